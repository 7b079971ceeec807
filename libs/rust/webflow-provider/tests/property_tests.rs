//! Property-based tests for webflow-provider crate.
//!
//! These tests verify universal properties of change detection, identifiers
//! and controller behavior using proptest.

use proptest::prelude::*;
use serde_json::{Map, Value};
use std::sync::Arc;
use test_utils::mocks::ScriptedTransport;
use test_utils::{
    empty_response, field_data_strategy, field_value_strategy, instance_id_strategy,
    object_id_strategy, path_strategy, redirect_status_strategy, trigger_type_strategy,
    webhook_url_strategy,
};
use webflow_client::{Endpoint, WebflowClient};
use webflow_provider::{
    ChangeDecision, CollectionItemArgs, CollectionItemController, CollectionItemState,
    OperationContext, RedirectArgs, RedirectController, RedirectState, ResourceController,
    ResourceIdentifier, ResourceKind, WebhookArgs, WebhookController, WebhookState,
    strip_unchanged,
};

fn client(transport: ScriptedTransport) -> WebflowClient {
    WebflowClient::with_transport(Arc::new(transport), Endpoint::default())
}

fn offline() -> WebflowClient {
    client(ScriptedTransport::responses(vec![]))
}

fn redirect_args() -> impl Strategy<Value = RedirectArgs> {
    (object_id_strategy(), path_strategy(), path_strategy(), redirect_status_strategy()).prop_map(
        |(site_id, source_path, destination_path, status_code)| RedirectArgs {
            site_id,
            source_path,
            destination_path,
            status_code,
        },
    )
}

fn webhook_args() -> impl Strategy<Value = WebhookArgs> {
    (object_id_strategy(), trigger_type_strategy(), webhook_url_strategy()).prop_map(
        |(site_id, trigger_type, url)| WebhookArgs {
            site_id,
            trigger_type,
            url,
            filter: None,
        },
    )
}

fn item_args() -> impl Strategy<Value = CollectionItemArgs> {
    (
        object_id_strategy(),
        field_data_strategy(),
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<bool>()),
        proptest::option::of(object_id_strategy()),
    )
        .prop_map(|(collection_id, field_data, is_archived, is_draft, cms_locale_id)| {
            CollectionItemArgs {
                collection_id,
                field_data,
                is_archived,
                is_draft,
                cms_locale_id,
                publish: false,
            }
        })
}

fn item_state(args: CollectionItemArgs) -> CollectionItemState {
    CollectionItemState {
        args,
        last_published: None,
        last_updated: None,
        created_on: None,
    }
}

fn webhook_state(args: WebhookArgs) -> WebhookState {
    WebhookState {
        args,
        workspace_id: None,
        last_triggered: None,
        created_on: None,
    }
}

// **Property 5: Converged State Has No Diff**
// *For any* valid desired state, diffing it against an observed state carrying
// the same values yields NoChange.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_redirect_equal_is_no_change(args in redirect_args()) {
        let controller = RedirectController::new(offline());
        let observed = RedirectState { args: args.clone(), created_on: None };
        prop_assert_eq!(controller.diff(&args, &observed), ChangeDecision::NoChange);
    }

    #[test]
    fn prop_webhook_equal_is_no_change(args in webhook_args()) {
        let controller = WebhookController::new(offline());
        prop_assert!(controller.diff(&args, &webhook_state(args.clone())).is_no_change());
    }

    #[test]
    fn prop_item_equal_is_no_change(args in item_args()) {
        let controller = CollectionItemController::new(offline());
        prop_assert!(controller.diff(&args, &item_state(args.clone())).is_no_change());
    }

    #[test]
    fn prop_redirect_unreported_status_is_no_change(args in redirect_args()) {
        let controller = RedirectController::new(offline());
        let observed = RedirectState {
            args: RedirectArgs { status_code: 0, ..args.clone() },
            created_on: None,
        };
        prop_assert!(controller.diff(&args, &observed).is_no_change());
    }
}

// **Property 6: Kinds Without Update Always Replace**
// *For any* change to a webhook, the decision is ReplaceRequired.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_webhook_change_replaces(
        args in webhook_args(),
        other_url in webhook_url_strategy(),
        other_trigger in trigger_type_strategy(),
    ) {
        prop_assume!(other_url != args.url || other_trigger != args.trigger_type);
        let controller = WebhookController::new(offline());
        let observed = webhook_state(WebhookArgs {
            url: other_url,
            trigger_type: other_trigger,
            ..args.clone()
        });
        prop_assert!(controller.diff(&args, &observed).requires_replace());
    }

    #[test]
    fn prop_redirect_destination_change_replaces(args in redirect_args(), other in path_strategy()) {
        prop_assume!(other != args.destination_path);
        let controller = RedirectController::new(offline());
        let observed = RedirectState {
            args: RedirectArgs { destination_path: other, ..args.clone() },
            created_on: None,
        };
        prop_assert_eq!(
            controller.diff(&args, &observed),
            ChangeDecision::ReplaceRequired(vec!["destinationPath".to_string()])
        );
    }
}

// **Property 7: Omitted Optional Fields Never Diff**
// *For any* server-populated values of fields the caller left unset, and any
// extra server-side field data keys, the decision is NoChange.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_unset_item_fields_ignored(
        collection_id in object_id_strategy(),
        field_data in field_data_strategy(),
        server_archived in any::<bool>(),
        server_draft in any::<bool>(),
        server_locale in object_id_strategy(),
        server_value in field_value_strategy(),
    ) {
        let desired = CollectionItemArgs {
            collection_id,
            field_data,
            is_archived: None,
            is_draft: None,
            cms_locale_id: None,
            publish: false,
        };
        let mut observed_data = desired.field_data.clone();
        observed_data.insert("_server-only".to_string(), server_value);
        let observed = item_state(CollectionItemArgs {
            field_data: observed_data,
            is_archived: Some(server_archived),
            is_draft: Some(server_draft),
            cms_locale_id: Some(server_locale),
            ..desired.clone()
        });

        let controller = CollectionItemController::new(offline());
        prop_assert!(controller.diff(&desired, &observed).is_no_change());
    }

    #[test]
    fn prop_changed_item_field_updates_in_place(args in item_args(), replacement in "[a-z]{1,8}") {
        let key = args.field_data.keys().next().cloned().unwrap();
        let mut observed_data = args.field_data.clone();
        let changed = Value::from(format!("{replacement}-changed"));
        prop_assume!(observed_data.get(&key) != Some(&changed));
        observed_data.insert(key.clone(), changed);

        let controller = CollectionItemController::new(offline());
        let observed = item_state(CollectionItemArgs { field_data: observed_data, ..args.clone() });
        prop_assert_eq!(
            controller.diff(&args, &observed),
            ChangeDecision::UpdateInPlace(vec![format!("fieldData.{key}")])
        );
    }
}

// **Property 8: Update Payload Stripping**
// *For any* field data, an unchanged slug is dropped from the patch and every
// other key is kept verbatim.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_unchanged_slug_stripped(
        mut payload in field_data_strategy(),
        slug in "[a-z0-9-]{1,20}",
        slug_changed in any::<bool>(),
    ) {
        payload.insert("slug".to_string(), Value::from(slug.clone()));
        let mut prior = Map::new();
        let prior_slug = if slug_changed { format!("{slug}-old") } else { slug };
        prior.insert("slug".to_string(), Value::from(prior_slug));

        let stripped = strip_unchanged(&payload, &prior, &["slug"]);

        prop_assert_eq!(stripped.contains_key("slug"), slug_changed);
        for (key, value) in &payload {
            if key != "slug" {
                prop_assert_eq!(stripped.get(key), Some(value));
            }
        }
    }
}

// **Property 9: Identifier Round Trip**
// *For any* parent and instance ID, formatting then parsing yields the same
// identifier; inputs with a wrong segment count or plural are rejected.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_identifier_round_trip(
        parent in object_id_strategy(),
        id in instance_id_strategy(),
        kind in proptest::sample::select(ResourceKind::ALL.to_vec()),
    ) {
        let identifier = ResourceIdentifier::new(kind, parent, id);
        let parsed: ResourceIdentifier = identifier.to_string().parse().unwrap();
        prop_assert_eq!(&parsed, &identifier);
        prop_assert!(ResourceIdentifier::parse_for(kind, &identifier.to_string()).is_ok());
    }

    #[test]
    fn prop_identifier_rejects_malformed(
        parent in object_id_strategy(),
        id in instance_id_strategy(),
        extra in instance_id_strategy(),
        plural in "[a-z]{3,10}",
    ) {
        prop_assume!(ResourceKind::from_plural(&plural).is_none());
        let too_many = format!("{parent}/redirects/{id}/{extra}");
        let too_few = format!("{parent}/{id}");
        let unknown = format!("{parent}/{plural}/{id}");
        let empty_id = format!("{parent}/items/");
        for raw in [too_many, too_few, unknown, empty_id] {
            let err = raw.parse::<ResourceIdentifier>().unwrap_err();
            prop_assert!(err.is_validation());
        }
    }
}

// **Property 10: Idempotent Delete**
// *For any* identifier, deleting a resource that is already gone succeeds.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_delete_absent_succeeds(
        parent in object_id_strategy(),
        id in instance_id_strategy(),
        status in prop_oneof![Just(200u16), Just(204u16), Just(404u16)],
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let ctx = OperationContext::new();

        let redirects = RedirectController::new(client(ScriptedTransport::responses(vec![empty_response(status)])));
        let webhooks = WebhookController::new(client(ScriptedTransport::responses(vec![empty_response(status)])));
        let items = CollectionItemController::new(client(ScriptedTransport::responses(vec![empty_response(status)])));

        runtime.block_on(async {
            redirects
                .delete(&ctx, &ResourceIdentifier::new(ResourceKind::Redirect, &parent, &id))
                .await
                .unwrap();
            webhooks
                .delete(&ctx, &ResourceIdentifier::new(ResourceKind::Webhook, &parent, &id))
                .await
                .unwrap();
            items
                .delete(&ctx, &ResourceIdentifier::new(ResourceKind::CollectionItem, &parent, &id))
                .await
                .unwrap();
        });
    }
}

#[tokio::test]
async fn test_dry_run_create_never_calls_api() {
    let transport = Arc::new(ScriptedTransport::responses(vec![]));
    let controller = RedirectController::new(WebflowClient::with_transport(
        transport.clone(),
        Endpoint::default(),
    ));
    let args = RedirectArgs {
        site_id: test_utils::fixtures::SITE_ID.to_string(),
        source_path: "/a".to_string(),
        destination_path: "/b".to_string(),
        status_code: 302,
    };

    let created = controller.create(&OperationContext::preview(), &args).await.unwrap();

    assert!(created.id.id.starts_with("preview-"));
    assert_eq!(transport.calls(), 0);
}

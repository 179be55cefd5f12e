use serde::{Deserialize, Serialize};

use crate::application::{Application, ProviderRef};
use crate::event::Event;
use crate::model::{Model, Resolution};

pub const TAB_OVERVIEW: &str = "Overview";
pub const TAB_POLICY_BINDINGS: &str = "Policy Bindings";
pub const LOADING_HEADING: &str = "Loading...";
pub const LOADING_PLACEHOLDER_HEADER: &str = "Loading";
pub const CARD_USAGE_CHART: &str = "Logins over the last 24 hours";
pub const CARD_RELATED: &str = "Related";
pub const CARD_CHANGELOG: &str = "Changelog";
pub const CARD_POLICY_BINDINGS: &str =
    "These policies control which users can access this application.";
pub const PROVIDER_ROUTE_PREFIX: &str = "#/core/providers/";
pub const TARGET_MODEL_APP: &str = "switchboard_core";
pub const TARGET_MODEL_NAME: &str = "application";

/// What the shell renders. Fully serializable; widgets on the shell side
/// receive exactly the parameters carried here and nothing else.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewModel {
    pub state: ViewState,
    pub slug: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewState {
    Loading {
        heading: String,
        placeholder: EmptyState,
    },
    Resolved {
        header: DetailHeader,
        tabs: Vec<TabSection>,
    },
    Error {
        title: String,
        message: String,
        is_retryable: bool,
        retry_event: Option<String>,
    },
}

/// Parameters of the shell's empty-state widget, shown while the lookup is
/// in flight.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmptyState {
    pub loading: bool,
    pub header: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetailHeader {
    pub name: String,
    pub icon_url: Option<String>,
    pub publisher: Option<String>,
}

impl DetailHeader {
    #[must_use]
    pub fn for_application(application: &Application) -> Self {
        Self {
            name: application.name.clone(),
            icon_url: application.icon_url().map(String::from),
            publisher: application.publisher().map(String::from),
        }
    }
}

/// One named division of the tabbed content area.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TabSection {
    pub title: String,
    pub cards: Vec<Card>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub body: CardBody,
}

/// The widget behind a card. These bindings are the only data that crosses
/// into the opaque child widgets.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum CardBody {
    UsageChart(UsageChartParams),
    Related(RelatedCard),
    Changelog(ChangelogParams),
    PolicyBindings(PolicyBindingsParams),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsageChartParams {
    pub application_slug: String,
}

impl UsageChartParams {
    #[must_use]
    pub fn for_application(application: &Application) -> Self {
        Self {
            application_slug: application.slug.as_str().to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelatedCard {
    pub provider: Option<ProviderLink>,
}

/// Link to the provider backing this application.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderLink {
    pub label: String,
    pub href: String,
}

impl ProviderLink {
    #[must_use]
    pub fn for_provider(provider: &ProviderRef) -> Self {
        Self {
            label: provider.name.clone(),
            href: format!("{PROVIDER_ROUTE_PREFIX}{}", provider.pk),
        }
    }
}

/// Parameters of the change-history widget. The pk may be empty before
/// resolution; the widget tolerates that.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangelogParams {
    pub target_model_pk: String,
    pub target_model_app: String,
    pub target_model_name: String,
}

impl ChangelogParams {
    #[must_use]
    pub fn for_application(application: &Application) -> Self {
        Self {
            target_model_pk: application.pk.as_str().to_string(),
            target_model_app: TARGET_MODEL_APP.to_string(),
            target_model_name: TARGET_MODEL_NAME.to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyBindingsParams {
    pub target: String,
}

impl PolicyBindingsParams {
    #[must_use]
    pub fn for_application(application: &Application) -> Self {
        Self {
            target: application.pk.as_str().to_string(),
        }
    }
}

impl TabSection {
    /// First section: usage chart, related links, change history.
    #[must_use]
    pub fn overview(application: &Application) -> Self {
        Self {
            title: TAB_OVERVIEW.to_string(),
            cards: vec![
                Card {
                    title: CARD_USAGE_CHART.to_string(),
                    body: CardBody::UsageChart(UsageChartParams::for_application(application)),
                },
                Card {
                    title: CARD_RELATED.to_string(),
                    body: CardBody::Related(RelatedCard {
                        provider: application.provider.as_ref().map(ProviderLink::for_provider),
                    }),
                },
                Card {
                    title: CARD_CHANGELOG.to_string(),
                    body: CardBody::Changelog(ChangelogParams::for_application(application)),
                },
            ],
        }
    }

    /// Second section: the policy bindings governing who may access the
    /// application.
    #[must_use]
    pub fn policy_bindings(application: &Application) -> Self {
        Self {
            title: TAB_POLICY_BINDINGS.to_string(),
            cards: vec![Card {
                title: CARD_POLICY_BINDINGS.to_string(),
                body: CardBody::PolicyBindings(PolicyBindingsParams::for_application(application)),
            }],
        }
    }
}

/// Both sections in their fixed order.
#[must_use]
pub fn compose_tabs(application: &Application) -> Vec<TabSection> {
    vec![
        TabSection::overview(application),
        TabSection::policy_bindings(application),
    ]
}

/// Total projection from model to view model. Pure; matches on the
/// resolution discriminant, so no branch can touch entity fields before the
/// lookup settled.
#[must_use]
pub fn project(model: &Model) -> ViewModel {
    let state = match model.resolution() {
        Resolution::Unresolved => ViewState::Loading {
            heading: LOADING_HEADING.to_string(),
            placeholder: EmptyState {
                loading: true,
                header: LOADING_PLACEHOLDER_HEADER.to_string(),
            },
        },
        Resolution::Resolved(application) => ViewState::Resolved {
            header: DetailHeader::for_application(application),
            tabs: compose_tabs(application),
        },
        Resolution::Failed(error) => ViewState::Error {
            title: error.title().to_string(),
            message: error.user_facing_message(),
            is_retryable: error.is_retryable(),
            retry_event: error
                .is_retryable()
                .then(|| Event::RetryRequested.name().to_string()),
        },
    };
    ViewModel {
        state,
        slug: model.slug().map(|slug| slug.as_str().to_string()),
    }
}

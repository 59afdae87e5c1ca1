use serde::Deserialize;

/// Asks the gateway to simulate an outcome instead of delivering anything.
///
/// The flag is attached to every request made by a client while it is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestingMode {
    #[default]
    None,
    AlwaysSucceed,
    AlwaysFail,
}

impl TestingMode {
    /// The form parameter selecting this mode, if any.
    pub fn form_param(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::None => None,
            Self::AlwaysSucceed => Some(("test_always_succeed", "1")),
            Self::AlwaysFail => Some(("test_always_fail", "1")),
        }
    }
}

/// Delivery-priority tier for a message (`routing_group`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingGroup {
    #[default]
    Default,
    Economy,
    Standard,
    Premium,
}

impl RoutingGroup {
    /// Form field name used by the gateway (`routing_group`).
    pub const FIELD: &'static str = "routing_group";

    /// Integer value sent on the wire.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Default => 0,
            Self::Economy => 1,
            Self::Standard => 2,
            Self::Premium => 3,
        }
    }

    pub fn is_default(self) -> bool {
        self == Self::Default
    }
}

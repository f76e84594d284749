use serde::{Deserialize, Serialize};

use crate::shared_str::SharedStr;

/// Something on the page a pointer (or key binding) can land on.
///
/// Views attach a target to every clickable shape; renderers hit-test and
/// send the target back wrapped in an [`Interaction`]. Ids are the dataset
/// ids (`"redbull"`, `"monaco"`, `"front-wing"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitTarget {
    /// Car-anatomy hotspot marker.
    CarPart(SharedStr),
    /// Dimmed area around the car-part detail card.
    PartBackdrop,
    /// Close control on the car-part detail card.
    PartClose,
    /// Tyre compound swatch.
    Tyre(SharedStr),
    /// Team tab in the grid section.
    TeamTab(SharedStr),
    /// Driver card of the active team.
    DriverCard(SharedStr),
    /// Dimmed area around the driver stats modal.
    DriverBackdrop,
    /// Close control on the driver stats modal.
    DriverClose,
    /// The body of a modal. Swallows clicks so they don't reach the backdrop.
    ModalSurface,
    /// Entry in the circuit list.
    TrackItem(SharedStr),
    /// Accordion header in the rules section.
    RuleHeader(SharedStr),
    /// Essentials card in the basics section.
    Essential(SharedStr),
}

/// A discrete user input event, already resolved to its target.
///
/// Hover and click are kept apart so sections can decide whether hover
/// means anything to them (the tyre picker and essentials cards care, the
/// rest ignore it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interaction {
    Click(HitTarget),
    HoverEnter(HitTarget),
    HoverLeave(HitTarget),
}

impl Interaction {
    pub fn target(&self) -> &HitTarget {
        match self {
            Self::Click(t) | Self::HoverEnter(t) | Self::HoverLeave(t) => t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape() {
        let click = Interaction::Click(HitTarget::TeamTab("redbull".into()));
        let json = serde_json::to_string(&click).unwrap_or_default();
        assert_eq!(json, r#"{"Click":{"TeamTab":"redbull"}}"#);

        let close = Interaction::Click(HitTarget::DriverClose);
        let json = serde_json::to_string(&close).unwrap_or_default();
        assert_eq!(json, r#"{"Click":"DriverClose"}"#);
    }

    #[test]
    fn parses_from_bridge_json() {
        let parsed: Option<Interaction> =
            serde_json::from_str(r#"{"HoverEnter":{"Tyre":"Medium"}}"#).ok();
        assert_eq!(
            parsed,
            Some(Interaction::HoverEnter(HitTarget::Tyre("Medium".into())))
        );
    }

    #[test]
    fn target_of_each_kind() {
        let t = HitTarget::Essential("pit-stop".into());
        assert_eq!(Interaction::HoverLeave(t.clone()).target(), &t);
        assert_eq!(Interaction::Click(t.clone()).target(), &t);
    }
}

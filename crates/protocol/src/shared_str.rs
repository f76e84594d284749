use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Immutable label or dataset id shared between render commands and hit
/// targets. Cloning bumps a refcount.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SharedStr(Arc<str>);

impl SharedStr {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SharedStr {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for SharedStr {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl std::ops::Deref for SharedStr {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SharedStr {
    fn from(s: &str) -> Self {
        SharedStr(Arc::from(s))
    }
}

impl From<String> for SharedStr {
    fn from(s: String) -> Self {
        SharedStr(Arc::from(s))
    }
}

impl std::fmt::Display for SharedStr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for SharedStr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SharedStr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Owned, so escaped strings from the WASM bridge round-trip too.
        let s = String::deserialize(deserializer)?;
        Ok(SharedStr::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HitTarget;

    #[test]
    fn hit_target_clones_share_the_id() {
        let tab = HitTarget::TeamTab("ferrari".into());
        let copy = tab.clone();
        match (&tab, &copy) {
            (HitTarget::TeamTab(a), HitTarget::TeamTab(b)) => {
                assert!(Arc::ptr_eq(&a.0, &b.0));
                assert_eq!(a, "ferrari");
            }
            _ => panic!("clone changed the variant"),
        }
        assert_eq!(tab, copy);
    }

    #[test]
    fn escaped_track_names_decode() {
        let target: HitTarget =
            serde_json::from_str(r#"{"TrackItem":"s\u00e3o-paulo"}"#).unwrap_or(HitTarget::ModalSurface);
        assert_eq!(target, HitTarget::TrackItem("s\u{e3}o-paulo".into()));
        let json = serde_json::to_string(&target).unwrap_or_default();
        assert_eq!(json, "{\"TrackItem\":\"s\u{e3}o-paulo\"}");
    }
}

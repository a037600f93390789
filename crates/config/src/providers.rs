//! Figment providers for `fund-me.toml`.

use crate::Config;
use figment::{
    Error, Metadata, Profile, Provider,
    error::Kind,
    value::{Dict, Map, Value},
};

/// Reads the `[profile.<name>]` sections of a nested provider as the figment profiles `<name>`.
///
/// ```toml
/// [profile.default]
/// default_network = "sepolia"
///
/// [profile.ci.networks.sepolia]
/// block_confirmations = 1
/// ```
///
/// yields `default_network` in profile `default` and `networks.sepolia` in profile `ci`. Tables
/// outside of `[profile]` are ignored.
pub(crate) struct ProfileSectionProvider<P> {
    provider: P,
}

impl<P> ProfileSectionProvider<P> {
    pub(crate) fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: Provider> Provider for ProfileSectionProvider<P> {
    fn metadata(&self) -> Metadata {
        self.provider.metadata()
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut data = self.provider.data()?;
        let mut profiles = Map::new();
        if let Some(sections) = data.remove(&Profile::new(Config::PROFILE_SECTION)) {
            for (name, section) in sections {
                let profile = Profile::new(&name);
                match section {
                    Value::Dict(_, dict) => {
                        profiles.insert(profile, dict);
                    }
                    bad => {
                        let mut err = Error::from(Kind::InvalidType(bad.to_actual(), "table".into()));
                        err.metadata = Some(self.provider.metadata());
                        err.profile = Some(profile);
                        err.path = vec![Config::PROFILE_SECTION.to_string(), name];
                        return Err(err);
                    }
                }
            }
        }
        for section in data.keys() {
            warn!(target: "config", %section, "ignoring table outside of `[profile]`");
        }
        Ok(profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::{Format, Toml};

    #[test]
    fn unwraps_profiles() {
        let toml = Toml::string(
            r#"
            [profile.default]
            default_network = "sepolia"

            [profile.ci.networks.sepolia]
            block_confirmations = 1

            [networks.ignored]
            chain_id = 1
            "#,
        )
        .nested();
        let data = ProfileSectionProvider::new(toml).data().unwrap();

        assert_eq!(data.keys().map(ToString::to_string).collect::<Vec<_>>(), ["ci", "default"]);
        assert_eq!(data[&Profile::new("default")]["default_network"].as_str(), Some("sepolia"));
        assert!(data[&Profile::new("ci")].contains_key("networks"));
    }

    #[test]
    fn rejects_non_table_profile() {
        let toml = Toml::string(r#"profile = { default = 1 }"#).nested();
        let err = ProfileSectionProvider::new(toml).data().unwrap_err();
        assert_eq!(err.path, ["profile", "default"]);
    }
}

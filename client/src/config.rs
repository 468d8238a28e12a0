use crate::route::Route;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_ROOT: &str = "http://localhost:3000/";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// where the academic API lives, every request path is joined to it
    pub api_root: String,
    /// page shown at startup
    pub start_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            // the browser build has no file nor environment to read, it is baked at compile time
            api_root: option_env!("GESTION_API_ROOT")
                .unwrap_or(DEFAULT_API_ROOT)
                .to_string(),
            start_path: Route::Dashboard.path().to_string(),
        }
    }
}

impl ClientConfig {
    pub const FILE: &'static str = "gestion.json";
    pub const ENV_PREFIX: &'static str = "GESTION_";

    /// None when the path matches no page
    pub fn start_route(&self) -> Option<Route> {
        Route::from_path(&self.start_path)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ClientConfig {
    /// defaults, then `gestion.json` if present, then `GESTION_*` variables
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment(Self::FILE).extract()
    }

    fn figment(file: &str) -> figment::Figment {
        use figment::providers::{Env, Format, Json, Serialized};
        figment::Figment::from(Serialized::defaults(ClientConfig::default()))
            .merge(Json::file(file))
            .merge(Env::prefixed(Self::ENV_PREFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_file_nor_env() {
        Jail::expect_with(|_jail| {
            let config = ClientConfig::load()?;
            assert_eq!(config, ClientConfig::default());
            assert_eq!(config.start_route(), Some(Route::Dashboard));
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                ClientConfig::FILE,
                r#"{ "api_root": "http://from-file:3000/", "start_path": "/alumnos" }"#,
            )?;
            jail.set_env("GESTION_API_ROOT", "http://from-env:8080/");

            let config = ClientConfig::load()?;
            assert_eq!(config.api_root, "http://from-env:8080/");
            assert_eq!(config.start_route(), Some(Route::Students));
            Ok(())
        });
    }

    #[test]
    fn unknown_start_path_has_no_route() {
        let config = ClientConfig {
            start_path: "/notas".to_string(),
            ..Default::default()
        };
        assert_eq!(config.start_route(), None);
    }
}

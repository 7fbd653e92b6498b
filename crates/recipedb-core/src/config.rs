/// Loads service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize` and call `Config::from_env()`
/// once at startup. Field names map to upper-cased env vars.
///
/// # Panics
///
/// Panics if a required env var is missing or cannot be deserialized.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> Self {
        envy::from_env().expect("failed to load config from environment")
    }

    /// Same as [`Config::from_env`] but reads from an explicit iterator of pairs.
    fn from_iter<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}

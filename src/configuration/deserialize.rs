pub mod media_type {
    use mime::Mime;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Mime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value
            .parse::<Mime>()
            .map_err(|err| D::Error::custom(format!("Invalid media type '{}': {}", value, err)))
    }
}

pub mod level_filter {
    use log::LevelFilter;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<LevelFilter, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value
            .parse::<LevelFilter>()
            .map_err(|_| D::Error::custom(format!("Unknown log level '{}'", value)))
    }
}

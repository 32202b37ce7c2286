#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct Config {
	#[serde(default)]
	pub reader: ReaderConfig,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct ReaderConfig {
	#[serde_inline_default(64)]
	/// how many nested objects a single document may contain before parsing is aborted
	pub max_depth: usize,

	#[serde_inline_default(true)]
	/// keep properties no entity claimed, so they can be serialized back untouched
	pub preserve_unknown: bool,
}

impl Config {
	pub fn load(path: Option<&std::path::PathBuf>) -> Self {
		let Some(cfg_path) = path else { return Config::default() };
		match std::fs::read_to_string(cfg_path) {
			Ok(x) => match toml::from_str(&x) {
				Ok(cfg) => return cfg,
				Err(e) => tracing::error!("failed parsing config file: {e}"),
			},
			Err(e) => tracing::error!("failed reading config file: {e}"),
		}
		Config::default()
	}
}

#[cfg(test)]
mod test {
	#[test]
	fn missing_keys_fall_back_to_defaults() {
		let cfg : super::Config = toml::from_str("[reader]\nmax_depth = 8\n").unwrap();
		assert_eq!(cfg.reader.max_depth, 8);
		assert!(cfg.reader.preserve_unknown);

		let empty : super::Config = toml::from_str("").unwrap();
		assert_eq!(empty.reader.max_depth, 64);
	}

	#[test]
	fn unreadable_config_file_yields_defaults() {
		let path = std::path::PathBuf::from("/definitely/not/here/asgraph.toml");
		let cfg = super::Config::load(Some(&path));
		assert_eq!(cfg.reader.max_depth, 64);
	}
}

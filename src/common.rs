//! Common functionality shared across configuration types

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, crate::error::RtlGraphError>;
}

/// Trait for configurations that can be created from the parsed command line
pub trait FromCommand: Sized {
    fn from_command(cli: crate::cli::Cli) -> Result<Self, crate::error::RtlGraphError>;
}

/// Macro to implement `TryFrom<Cli>` using [`FromCommand`] trait
#[macro_export]
macro_rules! impl_try_from_command {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Cli> for $config {
            type Error = $crate::error::RtlGraphError;

            fn try_from(cli: $crate::cli::Cli) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCommand>::from_command(cli)
            }
        }
    };
}

/// Build the `ConfigurationError` reported for an unset builder field
pub(crate) fn missing_field(field: &str) -> crate::error::RtlGraphError {
    crate::error::RtlGraphError::ConfigurationError {
        message: format!("Missing required field: {field}"),
    }
}

use crate::error::Result;

/// One named section of the application configuration.
pub trait ConfigSection {
    fn section_name() -> &'static str;

    fn validate(&self) -> Result<()>;
}

use std::path::PathBuf;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn password(&self) -> String;
    fn frontend_path(&self) -> PathBuf;
    fn port(&self) -> String;
    fn database_url(&self) -> Option<String>;
    /// Timezone policy for day bucketing, as a fixed offset from UTC in
    /// minutes. Applied uniformly on the read and write paths.
    fn utc_offset_minutes(&self) -> i32;
}

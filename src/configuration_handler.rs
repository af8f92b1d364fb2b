use crate::configuration::Configuration;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "interview_scheduler", about = "Mock interview scheduling server")]
pub struct ConfigurationHandler {
    #[arg(long, env = "PORT", default_value = "3000")]
    port: String,

    /// Without a database URL the server keeps bookings in memory.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(long, env = "ADMIN_PASSWORD", default_value = "123")]
    admin_password: String,

    #[arg(long, env = "FRONTEND_PATH", default_value = "../frontend/index.html")]
    frontend_path: PathBuf,

    /// Fixed UTC offset in minutes used to bucket timestamps into calendar
    /// days.
    #[arg(long, env = "UTC_OFFSET_MINUTES", default_value_t = 0)]
    utc_offset_minutes: i32,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn password(&self) -> String {
        self.admin_password.clone()
    }

    fn frontend_path(&self) -> PathBuf {
        self.frontend_path.clone()
    }

    fn port(&self) -> String {
        self.port.clone()
    }

    fn database_url(&self) -> Option<String> {
        self.database_url.clone()
    }

    fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }
}

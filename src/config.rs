use anyhow::{Error, Result, anyhow};
use dotenvy::dotenv;
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub database_url: String,

    pub fcm_project_id: String,

    #[serde(default = "default_fcm_endpoint")]
    pub fcm_endpoint: String,

    pub firebase_service_account: Option<String>,

    pub server_port: u16,
}

fn default_fcm_endpoint() -> String {
    "https://fcm.googleapis.com".to_string()
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        dotenv().ok();

        let config = envy::from_env::<Self>()
            .map_err(|_| anyhow!("Invalid or missing environmental variable"))?;
        Ok(config)
    }
}

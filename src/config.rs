use anyhow::Result;

#[derive(Debug, Clone)]
pub struct Config {
    // Client
    pub api_base_url: String,
    pub base_path: String,

    // Server
    pub port: u16,
    pub database_path: String,

    // User code generation
    pub datacenter_id: u64,
    pub worker_id: u64,

    // Survey code reserve
    pub min_id_reserve: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Client
            api_base_url: std::env::var("BACKWAVE_API_URL")
                .unwrap_or_else(|_| "http://localhost:5001".to_string()),
            base_path: std::env::var("BACKWAVE_BASE_PATH")
                .unwrap_or_else(|_| "/".to_string()),

            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5001),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/backwave.db".to_string()),

            // User code generation
            datacenter_id: std::env::var("DATACENTER_ID")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            worker_id: std::env::var("WORKER_ID")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),

            // Survey code reserve
            min_id_reserve: std::env::var("MIN_ID_RESERVE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
        })
    }
}

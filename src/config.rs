#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub upload_dir: String,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8000);
        let upload_dir =
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "static/uploads".to_string());

        Config {
            database_url,
            port,
            upload_dir,
        }
    }
}

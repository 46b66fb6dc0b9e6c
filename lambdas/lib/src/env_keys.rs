pub const BUCKET_SUFFIX: &str = "BUCKET_SUFFIX";
pub const ES_ENDPOINT: &str = "ES_ENDPOINT";
pub const ES_USERNAME: &str = "ES_USERNAME";
pub const ES_PASSWORD: &str = "ES_PASSWORD";

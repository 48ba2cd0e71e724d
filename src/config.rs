#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Maximum source size to analyze (in bytes)
    pub max_source_size: usize,
    /// Maximum number of detections to return per analysis
    pub limit: usize,
    /// Maximum number of completed analysis runs to cache
    pub analysis_cache_size: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_source_size: 5 * 1024 * 1024, // 5MB
            limit: 100,
            analysis_cache_size: 100,
        }
    }
}

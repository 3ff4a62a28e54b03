//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`)
//! con los TTL de caché por operación, los límites de la caché y el tamaño de
//! lote por defecto.
use once_cell::sync::Lazy;
use std::env;

/// Configuración global de la aplicación.
pub struct AppConfig {
    /// TTLs y límites de la caché de resultados.
    pub cache: CacheConfig,
    /// Parámetros del procesamiento por lotes.
    pub batch: BatchConfig,
}

/// Parámetros de la caché de resultados.
pub struct CacheConfig {
    /// TTL (segundos) de propiedades estimadas y formulaciones.
    pub predict_ttl_secs: f64,
    /// TTL (segundos) de visualizaciones generadas.
    pub visualize_ttl_secs: f64,
    /// TTL (segundos) de consultas a la fuente externa.
    pub lookup_ttl_secs: f64,
    /// Entradas a partir de las cuales se barre tras cada inserción.
    pub capacity: usize,
    /// Edad máxima (segundos) que sobrevive una entrada al barrido.
    pub max_age_secs: f64,
    /// Intervalo (segundos) del barrido periódico en segundo plano.
    pub sweep_interval_secs: u64,
}

pub struct BatchConfig {
    /// Tamaño de chunk por defecto al analizar lotes de moléculas.
    pub size: usize,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    let _ = dotenvy::dotenv();
    AppConfig {
        cache: CacheConfig {
            predict_ttl_secs: env_or("CACHE_PREDICT_TTL_SECS", 3600.0),
            visualize_ttl_secs: env_or("CACHE_VISUALIZE_TTL_SECS", 300.0),
            lookup_ttl_secs: env_or("CACHE_LOOKUP_TTL_SECS", 86_400.0),
            capacity: env_or("CACHE_CAPACITY", 100),
            max_age_secs: env_or("CACHE_MAX_AGE_SECS", 600.0),
            sweep_interval_secs: env_or("CACHE_SWEEP_INTERVAL_SECS", 300),
        },
        batch: BatchConfig {
            size: env_or("BATCH_SIZE", 10),
        },
    }
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // Los valores por defecto aplican cuando las variables no están definidas
        assert!(CONFIG.cache.predict_ttl_secs > 0.0);
        assert!(CONFIG.cache.capacity > 0);
        assert!(CONFIG.batch.size > 0);
    }
}

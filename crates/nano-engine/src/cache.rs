//! Caché de resultados con TTL por entrada y barrido por capacidad.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::errors::EngineError;
use crate::hashing::hash_str;

/// Capacidad a partir de la cual se barre la caché tras cada inserción.
pub const DEFAULT_CAPACITY: usize = 100;
/// Edad máxima (segundos) que sobrevive una entrada al barrido por capacidad.
pub const DEFAULT_MAX_AGE_SECS: f64 = 600.0;

/// Fuente de tiempo inyectable; los tests usan un reloj manual.
pub trait Clock: Send + Sync {
    /// Segundos desde epoch.
    fn now(&self) -> f64;
}

/// Reloj del sistema.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        SystemTime::now().duration_since(UNIX_EPOCH)
                         .map(|d| d.as_secs_f64())
                         .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    timestamp: f64,
}

/// Caché en memoria con clave `scope:hash(args)` y valor JSON.
///
/// Cada lectura valida el TTL del scope; además, cuando las entradas superan
/// la capacidad, se purgan las más viejas que la edad máxima. El cómputo en
/// caso de miss ocurre fuera del lock.
pub struct TtlCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
    capacity: usize,
    max_age: f64,
}

impl TtlCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { entries: Mutex::new(HashMap::new()),
               clock,
               capacity: DEFAULT_CAPACITY,
               max_age: DEFAULT_MAX_AGE_SECS }
    }

    pub fn with_limits(clock: Arc<dyn Clock>, capacity: usize, max_age: f64) -> Self {
        Self { entries: Mutex::new(HashMap::new()),
               clock,
               capacity,
               max_age }
    }

    /// Clave estable para un scope y sus argumentos serializados.
    pub fn cache_key(scope: &str, args: &str) -> String {
        format!("{scope}:{}", hash_str(args))
    }

    /// Devuelve el valor cacheado para `scope`/`args` si sigue vigente; en
    /// caso contrario ejecuta `compute`, guarda el resultado y lo devuelve.
    pub fn get_or_compute<T, F>(&self, scope: &str, args: &str, ttl_secs: f64, compute: F)
                                -> Result<T, EngineError>
        where T: Serialize + DeserializeOwned,
              F: FnOnce() -> Result<T, EngineError>
    {
        let key = Self::cache_key(scope, args);
        let now = self.clock.now();

        {
            let entries = self.entries
                              .lock()
                              .map_err(|e| EngineError::CachePoisoned(e.to_string()))?;
            if let Some(entry) = entries.get(&key) {
                if now - entry.timestamp < ttl_secs {
                    tracing::debug!(scope, key = %key, "cache hit");
                    return Ok(serde_json::from_value(entry.value.clone())?);
                }
            }
        }

        tracing::debug!(scope, key = %key, "cache miss");
        let computed = compute()?;
        let value = serde_json::to_value(&computed)?;

        let mut entries = self.entries
                              .lock()
                              .map_err(|e| EngineError::CachePoisoned(e.to_string()))?;
        entries.insert(key, CacheEntry { value, timestamp: now });
        if entries.len() > self.capacity {
            let cutoff = now - self.max_age;
            entries.retain(|_, e| e.timestamp >= cutoff);
        }
        Ok(computed)
    }

    /// Lectura directa para cómputos que no caben en un closure síncrono
    /// (p. ej. consultas async): devuelve el valor vigente o `None`.
    pub fn get<T: DeserializeOwned>(&self, scope: &str, args: &str, ttl_secs: f64)
                                    -> Result<Option<T>, EngineError> {
        let key = Self::cache_key(scope, args);
        let now = self.clock.now();
        let entries = self.entries
                          .lock()
                          .map_err(|e| EngineError::CachePoisoned(e.to_string()))?;
        match entries.get(&key) {
            Some(entry) if now - entry.timestamp < ttl_secs => {
                Ok(Some(serde_json::from_value(entry.value.clone())?))
            }
            _ => Ok(None),
        }
    }

    /// Contraparte de `get`: inserta un valor ya computado.
    pub fn insert<T: Serialize>(&self, scope: &str, args: &str, value: &T)
                                -> Result<(), EngineError> {
        let key = Self::cache_key(scope, args);
        let now = self.clock.now();
        let value = serde_json::to_value(value)?;
        let mut entries = self.entries
                              .lock()
                              .map_err(|e| EngineError::CachePoisoned(e.to_string()))?;
        entries.insert(key, CacheEntry { value, timestamp: now });
        if entries.len() > self.capacity {
            let cutoff = now - self.max_age;
            entries.retain(|_, e| e.timestamp >= cutoff);
        }
        Ok(())
    }

    /// Elimina toda entrada más vieja que la edad máxima.
    pub fn purge_expired(&self) -> Result<usize, EngineError> {
        let now = self.clock.now();
        let cutoff = now - self.max_age;
        let mut entries = self.entries
                              .lock()
                              .map_err(|e| EngineError::CachePoisoned(e.to_string()))?;
        let before = entries.len();
        entries.retain(|_, e| e.timestamp >= cutoff);
        Ok(before - entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Lanza un hilo desacoplado que purga la caché periódicamente.
pub fn spawn_sweeper(cache: Arc<TtlCache>, interval: Duration) {
    std::thread::spawn(move || loop {
        std::thread::sleep(interval);
        match cache.purge_expired() {
            Ok(0) => {}
            Ok(n) => tracing::debug!(purged = n, "barrido periódico de caché"),
            Err(e) => {
                tracing::warn!(error = %e, "barrido de caché falló");
                break;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ManualClock {
        now: Mutex<f64>,
    }

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self { now: Mutex::new(1_000.0) })
        }

        fn advance(&self, secs: f64) {
            *self.now.lock().unwrap() += secs;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> f64 {
            *self.now.lock().unwrap()
        }
    }

    #[test]
    fn test_hit_within_ttl_skips_compute() {
        let clock = ManualClock::new();
        let cache = TtlCache::with_clock(clock.clone());
        let calls = AtomicUsize::new(0);

        let compute = || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(42u32)
        };
        let a: u32 = cache.get_or_compute("props", "CCO", 300.0, compute).unwrap();
        clock.advance(100.0);
        let b: u32 = cache.get_or_compute("props", "CCO", 300.0, || {
                             calls.fetch_add(1, Ordering::SeqCst);
                             Ok(7u32)
                         })
                         .unwrap();
        assert_eq!(a, 42);
        assert_eq!(b, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_expired_entry_recomputes() {
        let clock = ManualClock::new();
        let cache = TtlCache::with_clock(clock.clone());

        let a: u32 = cache.get_or_compute("props", "CCO", 300.0, || Ok(1)).unwrap();
        clock.advance(301.0);
        let b: u32 = cache.get_or_compute("props", "CCO", 300.0, || Ok(2)).unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }

    #[test]
    fn test_scopes_do_not_collide() {
        let cache = TtlCache::with_clock(ManualClock::new());
        let a: u32 = cache.get_or_compute("props", "CCO", 300.0, || Ok(1)).unwrap();
        let b: u32 = cache.get_or_compute("formulation", "CCO", 300.0, || Ok(2)).unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_capacity_sweep_drops_old_entries() {
        let clock = ManualClock::new();
        let cache = TtlCache::with_limits(clock.clone(), 10, 600.0);

        for i in 0..10 {
            let _: u32 = cache.get_or_compute("props", &format!("m{i}"), 10_000.0, || Ok(i))
                              .unwrap();
        }
        clock.advance(700.0);
        // Inserción 11 dispara el barrido; las 10 previas superan la edad máxima
        let _: u32 = cache.get_or_compute("props", "fresh", 10_000.0, || Ok(99)).unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_purge_expired_counts_removals() {
        let clock = ManualClock::new();
        let cache = TtlCache::with_limits(clock.clone(), 100, 600.0);
        let _: u32 = cache.get_or_compute("props", "a", 10_000.0, || Ok(1)).unwrap();
        let _: u32 = cache.get_or_compute("props", "b", 10_000.0, || Ok(2)).unwrap();
        clock.advance(601.0);
        let _: u32 = cache.get_or_compute("props", "c", 10_000.0, || Ok(3)).unwrap();
        assert_eq!(cache.purge_expired().unwrap(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_compute_error_is_not_cached() {
        let cache = TtlCache::with_clock(ManualClock::new());
        let err: Result<u32, _> = cache.get_or_compute("props", "x", 300.0, || {
                                           Err(EngineError::Internal(String::from("boom")))
                                       });
        assert!(err.is_err());
        let ok: u32 = cache.get_or_compute("props", "x", 300.0, || Ok(5)).unwrap();
        assert_eq!(ok, 5);
    }

    #[test]
    fn test_structured_values_round_trip() {
        let cache = TtlCache::with_clock(ManualClock::new());
        let stored: Vec<String> =
            cache.get_or_compute("geometry", "CCO", 300.0, || {
                     Ok(vec![String::from("a"), String::from("b")])
                 })
                 .unwrap();
        let again: Vec<String> =
            cache.get_or_compute("geometry", "CCO", 300.0, || Ok(Vec::new())).unwrap();
        assert_eq!(stored, again);
    }

    #[test]
    fn test_direct_get_and_insert() {
        let clock = ManualClock::new();
        let cache = TtlCache::with_clock(clock.clone());
        assert_eq!(cache.get::<u32>("lookup", "CCO", 300.0).unwrap(), None);
        cache.insert("lookup", "CCO", &7u32).unwrap();
        assert_eq!(cache.get::<u32>("lookup", "CCO", 300.0).unwrap(), Some(7));
        clock.advance(301.0);
        assert_eq!(cache.get::<u32>("lookup", "CCO", 300.0).unwrap(), None);
    }
}

//! Procesamiento por lotes con paralelismo por chunk.

use rayon::prelude::*;

use crate::errors::EngineError;

/// Aplica `op` a cada ítem en chunks de `batch_size`, en paralelo dentro de
/// cada chunk. El resultado conserva el orden de entrada; un ítem que falla
/// se registra y queda como `None` sin afectar al resto del lote.
pub fn process_batch<I, O, F>(items: &[I], batch_size: usize, op: F) -> Vec<Option<O>>
    where I: Sync,
          O: Send,
          F: Fn(&I) -> Result<O, EngineError> + Sync
{
    let chunk = batch_size.max(1);
    let mut results = Vec::with_capacity(items.len());

    for batch in items.chunks(chunk) {
        let processed: Vec<Option<O>> = batch.par_iter()
                                             .map(|item| match op(item) {
                                                 Ok(out) => Some(out),
                                                 Err(e) => {
                                                     tracing::warn!(error = %e,
                                                                    "ítem de lote falló");
                                                     None
                                                 }
                                             })
                                             .collect();
        results.extend(processed);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_preserved() {
        let items: Vec<u32> = (0..25).collect();
        let out = process_batch(&items, 10, |i| Ok(i * 2));
        assert_eq!(out.len(), 25);
        for (i, v) in out.iter().enumerate() {
            assert_eq!(*v, Some(i as u32 * 2));
        }
    }

    #[test]
    fn test_failures_become_none_in_place() {
        let items = vec![1u32, 2, 3, 4, 5];
        let out = process_batch(&items, 2, |i| {
            if i % 2 == 0 {
                Err(EngineError::Internal(format!("item {i}")))
            } else {
                Ok(*i)
            }
        });
        assert_eq!(out, vec![Some(1), None, Some(3), None, Some(5)]);
    }

    #[test]
    fn test_empty_input() {
        let out: Vec<Option<u32>> = process_batch(&[], 10, |i: &u32| Ok(*i));
        assert!(out.is_empty());
    }

    #[test]
    fn test_zero_batch_size_is_clamped() {
        let items = vec![1u32, 2, 3];
        let out = process_batch(&items, 0, |i| Ok(*i));
        assert_eq!(out.len(), 3);
    }
}

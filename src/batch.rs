//! Classify many bios, optionally in parallel with a bounded number in flight.

use std::sync::Arc;

use crate::classify::Classifier;

/// Classify every bio concurrently, at most `jobs` at a time. Results keep input order.
pub async fn classify_all_async(
    classifier: Arc<Classifier>,
    bios: Vec<String>,
    jobs: usize,
) -> Result<Vec<Vec<String>>, Box<dyn std::error::Error + Send + Sync>> {
    let sem = Arc::new(tokio::sync::Semaphore::new(jobs.max(1)));
    let mut results = vec![Vec::new(); bios.len()];
    let mut join_set = tokio::task::JoinSet::new();

    for (i, bio) in bios.into_iter().enumerate() {
        let permit = sem.clone().acquire_owned().await?;
        let classifier = classifier.clone();
        join_set.spawn(async move {
            let _permit = permit;
            (i, classifier.classify(&bio))
        });
    }

    while let Some(join_result) = join_set.join_next().await {
        let (i, categories) = join_result.map_err(|e| e.to_string())?;
        results[i] = categories;
    }

    Ok(results)
}

/// Classify every bio. `jobs <= 1` runs inline; otherwise on a tokio runtime.
pub fn classify_all(
    classifier: &Arc<Classifier>,
    bios: Vec<String>,
    jobs: usize,
) -> Result<Vec<Vec<String>>, Box<dyn std::error::Error + Send + Sync>> {
    if jobs <= 1 {
        return Ok(bios.iter().map(|bio| classifier.classify(bio)).collect());
    }
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(classify_all_async(classifier.clone(), bios, jobs))
}

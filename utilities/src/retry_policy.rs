use std::{fmt::Display, time::Duration};
use tokio::time::sleep;
use tracing::{error, info};

/// Runs `f` up to `max_retries` times, doubling the pause after each failure.
pub async fn retry_with_backoff<F, Fut, R, E>(
    mut f: F,
    max_retries: u8,
    base_delay: Duration,
) -> Result<R, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<R, E>>,
    E: Display,
{
    let mut curr_try: u32 = 1;
    loop {
        match f().await {
            Ok(v) => {
                return Ok(v);
            }
            Err(e) => {
                error!(error=%e,retry=%curr_try,"Error happened while running closure");
                if curr_try >= max_retries.max(1) as u32 {
                    error!("Reached max retries return error");
                    return Err(e);
                }
            }
        }
        let sleep_duration = base_delay * 2u32.pow(curr_try);
        info!(?sleep_duration, "Waiting before retry");
        sleep(sleep_duration).await;
        curr_try += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicU8, Ordering},
    };

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_transient_failures() {
        let attempts = Arc::new(AtomicU8::new(0));
        let result: Result<u8, String> = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    if attempt < 3 {
                        Err(format!("attempt {attempt} failed"))
                    } else {
                        Ok(attempt)
                    }
                }
            },
            3,
            Duration::from_millis(200),
        )
        .await;
        assert_eq!(result, Ok(3));
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_retries() {
        let attempts = Arc::new(AtomicU8::new(0));
        let result: Result<(), String> = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err("refused".to_owned())
                }
            },
            2,
            Duration::from_millis(10),
        )
        .await;
        assert_eq!(result, Err("refused".to_owned()));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }
}

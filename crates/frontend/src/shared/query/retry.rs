use std::future::Future;

use crate::shared::api::ApiError;

const BASE_DELAY_MS: u32 = 1_000;
const MAX_DELAY_MS: u32 = 30_000;

/// Back-off before retry number `attempt` (0-based): 1 s, 2 s, 4 s … capped at 30 s.
pub fn retry_delay_ms(attempt: u32) -> u32 {
    BASE_DELAY_MS
        .saturating_mul(2u32.saturating_pow(attempt))
        .min(MAX_DELAY_MS)
}

/// Run `op`, repeating it up to `retries` times while it fails with a
/// transient error. Backend answers (HTTP, parse) are returned at once.
pub async fn with_retry<T, Op, Fut, Sleep, SleepFut>(
    retries: u32,
    mut op: Op,
    mut sleep: Sleep,
) -> Result<T, ApiError>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
    Sleep: FnMut(u32) -> SleepFut,
    SleepFut: Future<Output = ()>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Err(err) if err.is_transient() && attempt < retries => {
                let delay = retry_delay_ms(attempt);
                log::debug!("retry {} after {} ms: {}", attempt + 1, delay, err);
                sleep(delay).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}

/// Browser timer for [`with_retry`].
pub async fn browser_sleep(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

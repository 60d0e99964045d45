//! Network uplink startup gate
//!
//! Sources are useless without the network, so the display refuses to
//! start until association completes. Association status is polled, not
//! interrupt driven, and bounded by a timeout.

use embedded_hal_async::delay::DelayNs;

use crate::config::UplinkConfig;
use crate::traits::{Uplink, UplinkError};

/// Bring up the uplink, waiting at most `config.timeout_s`
pub async fn establish<U, D>(
    uplink: &mut U,
    delay: &mut D,
    config: &UplinkConfig,
) -> Result<(), UplinkError>
where
    U: Uplink,
    D: DelayNs,
{
    uplink.begin()?;

    let timeout_ms = u64::from(config.timeout_s) * 1000;
    let poll_ms = config.poll_interval_ms.max(1);
    let mut waited_ms: u64 = 0;

    loop {
        if uplink.is_connected() {
            info!("Uplink connected after {}ms", waited_ms);
            return Ok(());
        }
        if waited_ms >= timeout_ms {
            warn!("Uplink association timed out after {}s", config.timeout_s);
            return Err(UplinkError::Timeout);
        }

        delay.delay_ms(poll_ms).await;
        waited_ms += u64::from(poll_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    struct SlowUplink {
        polls_until_up: Option<u32>,
        polls: u32,
        reject: bool,
    }

    impl Uplink for SlowUplink {
        fn begin(&mut self) -> Result<(), UplinkError> {
            if self.reject {
                Err(UplinkError::Rejected)
            } else {
                Ok(())
            }
        }

        fn is_connected(&mut self) -> bool {
            self.polls += 1;
            matches!(self.polls_until_up, Some(n) if self.polls > n)
        }
    }

    #[derive(Default)]
    struct CountingDelay {
        total_ms: u64,
    }

    impl DelayNs for CountingDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.total_ms += u64::from(ns) / 1_000_000;
        }

        async fn delay_ms(&mut self, ms: u32) {
            self.total_ms += u64::from(ms);
        }
    }

    #[test]
    fn test_connects_after_polling() {
        let mut uplink = SlowUplink {
            polls_until_up: Some(3),
            polls: 0,
            reject: false,
        };
        let mut delay = CountingDelay::default();

        let result = block_on(establish(&mut uplink, &mut delay, &UplinkConfig::default()));
        assert_eq!(result, Ok(()));
        assert_eq!(uplink.polls, 4);
        assert_eq!(delay.total_ms, 3000);
    }

    #[test]
    fn test_times_out() {
        let mut uplink = SlowUplink {
            polls_until_up: None,
            polls: 0,
            reject: false,
        };
        let mut delay = CountingDelay::default();

        let result = block_on(establish(&mut uplink, &mut delay, &UplinkConfig::default()));
        assert_eq!(result, Err(UplinkError::Timeout));
        assert_eq!(delay.total_ms, 10_000);
        // Initial poll plus one per second waited
        assert_eq!(uplink.polls, 11);
    }

    #[test]
    fn test_rejected_start() {
        let mut uplink = SlowUplink {
            polls_until_up: Some(0),
            polls: 0,
            reject: true,
        };
        let mut delay = CountingDelay::default();

        let result = block_on(establish(&mut uplink, &mut delay, &UplinkConfig::default()));
        assert_eq!(result, Err(UplinkError::Rejected));
        assert_eq!(uplink.polls, 0);
    }
}

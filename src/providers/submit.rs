use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::info;

use super::{BookingSubmitter, SharedRng};
use crate::domain::{BookingDraft, ConfirmationCode};
use crate::errors::Result;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Draws a booking reference. Codes are not checked for uniqueness.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> ConfirmationCode {
    let raw: String = (0..ConfirmationCode::LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect();
    ConfirmationCode::from_generated(raw)
}

/// Pretends to send the booking, then returns a random reference.
#[derive(Clone)]
pub struct SimulatedSubmitter {
    latency: Duration,
    rng: SharedRng,
}

impl SimulatedSubmitter {
    pub fn new(latency: Duration, rng: SharedRng) -> Self {
        Self { latency, rng }
    }
}

#[async_trait]
impl BookingSubmitter for SimulatedSubmitter {
    async fn submit(&self, draft: &BookingDraft) -> Result<ConfirmationCode> {
        tokio::time::sleep(self.latency).await;
        let code = {
            let mut rng = self.rng.lock();
            generate_code(&mut *rng)
        };
        info!(
            code = %code,
            date = ?draft.date,
            time = %draft.time,
            service = %draft.service_id,
            "booking accepted"
        );
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn codes_are_six_uppercase_alphanumerics() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let code = generate_code(&mut rng);
            assert_eq!(code.as_str().len(), 6);
            assert!(code
                .as_str()
                .chars()
                .all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit()));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn submit_waits_for_latency() {
        let submitter = SimulatedSubmitter::new(Duration::from_millis(1500), SharedRng::new(Some(1)));
        let started = tokio::time::Instant::now();
        submitter.submit(&BookingDraft::default()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }
}

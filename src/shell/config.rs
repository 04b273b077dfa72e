// Runtime configuration, read from `SEAT_RESERVATIONS_*` environment variables.
// A `.env` file in the working directory is loaded first when present.

use crate::modules::bookings::use_cases::reserve_seats::handler::ReservationSettings;
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;

const PREFIX: &str = "SEAT_RESERVATIONS_";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} is not valid: {reason}")]
    Invalid { name: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub reservation: ReservationSettings,
    pub sweep_interval_ms: u64,
    pub projector_interval_ms: u64,
    pub max_append_attempts: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(error) = dotenvy::dotenv()
            && !error.not_found()
        {
            tracing::warn!(%error, "ignoring unreadable .env file");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source; unset variables take their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ReservationSettings::default();
        let config = Self {
            bind_addr: read(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?,
            reservation: ReservationSettings {
                hold_ttl_ms: read(&lookup, "HOLD_TTL_MS", defaults.hold_ttl_ms)?,
                reservation_ttl_ms: read(
                    &lookup,
                    "RESERVATION_TTL_MS",
                    defaults.reservation_ttl_ms,
                )?,
                max_seats_per_booking: read(
                    &lookup,
                    "MAX_SEATS_PER_BOOKING",
                    defaults.max_seats_per_booking,
                )?,
            },
            sweep_interval_ms: read(&lookup, "SWEEP_INTERVAL_MS", 5_000)?,
            projector_interval_ms: read(&lookup, "PROJECTOR_INTERVAL_MS", 250)?,
            max_append_attempts: read(&lookup, "MAX_APPEND_ATTEMPTS", 5)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("HOLD_TTL_MS", self.reservation.hold_ttl_ms > 0),
            ("RESERVATION_TTL_MS", self.reservation.reservation_ttl_ms > 0),
            ("MAX_SEATS_PER_BOOKING", self.reservation.max_seats_per_booking > 0),
            ("SWEEP_INTERVAL_MS", self.sweep_interval_ms > 0),
            ("PROJECTOR_INTERVAL_MS", self.projector_interval_ms > 0),
            ("MAX_APPEND_ATTEMPTS", self.max_append_attempts > 0),
        ];
        match positive.into_iter().find(|(_, ok)| !ok) {
            Some((name, _)) => Err(ConfigError::Invalid {
                name: format!("{PREFIX}{name}"),
                reason: "must be greater than zero".into(),
            }),
            None => Ok(()),
        }
    }
}

fn read<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let name = format!("{PREFIX}{name}");
    match lookup(&name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

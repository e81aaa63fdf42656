//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements                  | Connects to               |
//! |-------------|-----------------------------|---------------------------|
//! | `hardware`  | ClimateSensor, AnalogInput  | DHT11 GPIO, ESP32 ADC1    |
//! | `display`   | CharDisplay                 | LCD1602 over I²C          |
//! | `log_sink`  | EventSink                   | Serial log output         |
//! | `time`      | Clock                       | ESP32 system timer        |

pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod time;

use std::fmt;

use serde::Serialize;

/// Transport protocol of an advertised service.
///
/// Only TCP is ever actively probed. Anything that is not TCP (UDP, QUIC, ...)
/// is folded into [`Transport::Udp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Transport {
    Tcp,
    Udp,
}

impl Transport {
    pub fn is_tcp(self) -> bool {
        matches!(self, Transport::Tcp)
    }
}

impl From<&str> for Transport {
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("tcp") {
            Transport::Tcp
        } else {
            Transport::Udp
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Tcp => f.write_str("TCP"),
            Transport::Udp => f.write_str("UDP"),
        }
    }
}

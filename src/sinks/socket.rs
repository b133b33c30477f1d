//! Socket sink for remote logging
//!
//! Sends rendered text as raw bytes, with no framing, to a connected
//! Unix domain stream socket or an IPv4 TCP/UDP socket.

use super::Sink;
use crate::core::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use socket2::{Domain, SockAddr, Socket, Type};
use std::fmt;
use std::io::Write;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::str::FromStr;

/// Longest accepted Unix domain socket path, in bytes.
pub const MAX_UNIX_PATH_LEN: usize = 108;

/// Transport for IPv4 socket sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => f.write_str("tcp"),
            Protocol::Udp => f.write_str("udp"),
        }
    }
}

impl FromStr for Protocol {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tcp" => Ok(Protocol::Tcp),
            "udp" => Ok(Protocol::Udp),
            _ => Err(LoggerError::InvalidProtocol(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketKind {
    Unix,
    Tcp,
    Udp,
}

/// Identifies the socket a successful `open_socket` connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocketHandle {
    kind: SocketKind,
    #[cfg(unix)]
    fd: std::os::fd::RawFd,
}

impl SocketHandle {
    pub fn kind(&self) -> SocketKind {
        self.kind
    }

    /// The underlying descriptor. It stays valid while the socket is open
    /// or has queued messages left to deliver.
    #[cfg(unix)]
    pub fn raw_fd(&self) -> std::os::fd::RawFd {
        self.fd
    }
}

pub struct SocketSink {
    socket: Socket,
    kind: SocketKind,
    address: String,
}

impl SocketSink {
    /// Connect a stream socket to the Unix domain socket at `path`.
    #[cfg(unix)]
    pub fn connect_unix(path: &str) -> Result<Self> {
        if path.len() > MAX_UNIX_PATH_LEN {
            return Err(LoggerError::AddressTooLong {
                len: path.len(),
                max: MAX_UNIX_PATH_LEN,
            });
        }

        // sun_path also holds the NUL terminator, so a full-length path
        // is only rejected here.
        let addr = SockAddr::unix(path).map_err(|_| LoggerError::AddressTooLong {
            len: path.len(),
            max: MAX_UNIX_PATH_LEN,
        })?;
        let socket = Socket::new(Domain::UNIX, Type::STREAM, None)
            .map_err(|source| LoggerError::SocketCreateError { source })?;
        socket
            .connect(&addr)
            .map_err(|e| LoggerError::socket_connect(path, e))?;

        Ok(Self {
            socket,
            kind: SocketKind::Unix,
            address: path.to_string(),
        })
    }

    /// Connect to `host:port`, where `host` is a dotted IPv4 address.
    pub fn connect_inet(host: &str, port: u16, protocol: Protocol) -> Result<Self> {
        let ip: Ipv4Addr = host
            .parse()
            .map_err(|_| LoggerError::InvalidAddress(host.to_string()))?;
        let target = SocketAddrV4::new(ip, port);

        let (ty, proto, kind) = match protocol {
            Protocol::Tcp => (Type::STREAM, socket2::Protocol::TCP, SocketKind::Tcp),
            Protocol::Udp => (Type::DGRAM, socket2::Protocol::UDP, SocketKind::Udp),
        };

        let socket = Socket::new(Domain::IPV4, ty, Some(proto))
            .map_err(|source| LoggerError::SocketCreateError { source })?;
        socket
            .connect(&SockAddr::from(target))
            .map_err(|e| LoggerError::socket_connect(target.to_string(), e))?;

        Ok(Self {
            socket,
            kind,
            address: target.to_string(),
        })
    }

    pub fn kind(&self) -> SocketKind {
        self.kind
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn handle(&self) -> SocketHandle {
        SocketHandle {
            kind: self.kind,
            #[cfg(unix)]
            fd: std::os::fd::AsRawFd::as_raw_fd(&self.socket),
        }
    }
}

impl Sink for SocketSink {
    fn write(&self, text: &str) -> Result<()> {
        match self.kind {
            SocketKind::Udp => {
                self.socket.send(text.as_bytes())?;
            }
            SocketKind::Unix | SocketKind::Tcp => {
                (&self.socket).write_all(text.as_bytes())?;
            }
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        (&self.socket).flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "socket"
    }
}

impl fmt::Debug for SocketSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SocketSink")
            .field("kind", &self.kind)
            .field("address", &self.address)
            .finish()
    }
}

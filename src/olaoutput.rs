use std::net::{SocketAddr, UdpSocket};
use std::str::FromStr;

use log;
use rosc::{encoder, OscMessage, OscPacket, OscType};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::sink::Sink;

/// DMX channels per universe.
const UNIVERSE_SIZE: usize = 512;

/// Hardware driver sink that feeds an OLA daemon over OSC/UDP.
///
/// Every flush bakes the frame's alpha over black, packs the RGB
/// triples into a DMX universe buffer and sends it as one OSC blob to
/// `/dmx/universe/<universe>`. OLA handles the timing-critical
/// transmission to the strip hardware. Frames that do not fit a single
/// universe (more than 170 pixels) are rejected.
pub struct OlaOutput {
    sock: UdpSocket,
    target_addr: SocketAddr,
    universe: u32,
    buffer: Vec<u8>,
}

impl OlaOutput {
    pub fn new(target_addr: SocketAddr, universe: u32) -> Result<OlaOutput> {
        let our_addr = SocketAddr::from_str("0.0.0.0:0").unwrap();
        let sock = UdpSocket::bind(our_addr)
            .map_err(|err| Error::SinkUnavailable(err.to_string()))?;
        log::debug!("OLA output bound, targeting {target_addr} universe {universe}");

        Ok(OlaOutput {
            sock,
            target_addr,
            universe,
            buffer: vec![0; UNIVERSE_SIZE],
        })
    }
}

impl Sink for OlaOutput {
    fn flush(&mut self, colors: &[Color]) -> Result<()> {
        if colors.len() * 3 > self.buffer.len() {
            return Err(Error::SinkUnavailable(format!(
                "{} pixels exceed one DMX universe",
                colors.len()
            )));
        }

        self.buffer.fill(0);
        for (i, color) in colors.iter().enumerate() {
            // Alpha baking pass; DMX channels have no transparency
            let baked = color.blend_over(Color::BLACK);
            self.buffer[i * 3] = baked.r;
            self.buffer[i * 3 + 1] = baked.g;
            self.buffer[i * 3 + 2] = baked.b;
        }

        let msg_buf = encoder::encode(&OscPacket::Message(OscMessage {
            addr: format!("/dmx/universe/{}", self.universe),
            args: vec![OscType::Blob(self.buffer.clone())],
        }))
        .map_err(|err| Error::SinkUnavailable(format!("OSC encoding failed: {err:?}")))?;

        self.sock
            .send_to(&msg_buf, self.target_addr)
            .map_err(|err| Error::SinkUnavailable(err.to_string()))?;
        Ok(())
    }
}

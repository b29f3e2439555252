/// Where a rendered page goes. Page producing code only talks to this trait.
pub trait PageSink {
    fn write_header(&mut self, status: u16);
    fn write_body(&mut self, bytes: &[u8]);
}

/// Keeps the page in memory, for the static generator.
#[derive(Debug, Default)]
pub struct BufferSink {
    status: Option<u16>,
    buf: Vec<u8>,
}

impl BufferSink {
    pub fn new() -> BufferSink {
        BufferSink::default()
    }

    /// Defaults to 200 when no header was written.
    pub fn status(&self) -> u16 {
        self.status.unwrap_or(200)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

impl PageSink for BufferSink {
    fn write_header(&mut self, status: u16) {
        // First header wins
        if self.status.is_none() {
            self.status = Some(status);
        }
    }

    fn write_body(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }
}

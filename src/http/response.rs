use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body_len: usize,
    /// Wall time from send to the last body byte
    pub elapsed: Duration,
}

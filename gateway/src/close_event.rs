#[derive(Debug, Clone)]
pub struct CloseEvent {
    pub status_code: u16,
    pub error: String,
}

impl CloseEvent {
    pub fn new(status_code: u16, error: String) -> Self {
        Self { status_code, error }
    }

    /// 4004 is an invalid token, 4010-4014 are sharding or intent misconfigurations. Reconnecting
    /// with the same identify payload cannot succeed.
    pub fn should_reconnect(&self) -> bool {
        !matches!(self.status_code, 4004 | 4010 | 4011 | 4012 | 4013 | 4014)
    }
}

use std::collections::HashSet;

/// Channel ids where ambient scanning is active.
#[derive(Debug, Clone, Default)]
pub struct ListenSet {
    channels: HashSet<String>,
}

impl ListenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the channel was not already listening.
    pub fn start(&mut self, channel_id: &str) -> bool {
        self.channels.insert(channel_id.to_string())
    }

    /// Returns true if the channel was listening.
    pub fn stop(&mut self, channel_id: &str) -> bool {
        self.channels.remove(channel_id)
    }

    pub fn contains(&self, channel_id: &str) -> bool {
        self.channels.contains(channel_id)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ListenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            channels: iter.into_iter().map(Into::into).collect(),
        }
    }
}

use std::fmt;

/// The exact string a request signature covers.
///
/// Rendered as `name:value` pairs in insertion order, joined by `,`. The
/// server rebuilds the same string from the request body, so field order,
/// names and separators must not change byte for byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalMessage {
    rendered: String,
}

impl CanonicalMessage {
    /// Render an ordered field list.
    pub fn from_fields(fields: &[(&str, &str)]) -> Self {
        let rendered = fields
            .iter()
            .map(|(name, value)| format!("{name}:{value}"))
            .collect::<Vec<_>>()
            .join(",");
        Self { rendered }
    }

    /// Append a `name:value` field.
    pub fn field(mut self, name: &str, value: &str) -> Self {
        self.separate();
        self.rendered.push_str(name);
        self.rendered.push(':');
        self.rendered.push_str(value);
        self
    }

    /// Append a field rendered as `namevalue`, without the `:` separator.
    pub fn bare_field(mut self, name: &str, value: &str) -> Self {
        self.separate();
        self.rendered.push_str(name);
        self.rendered.push_str(value);
        self
    }

    fn separate(&mut self) {
        if !self.rendered.is_empty() {
            self.rendered.push(',');
        }
    }

    pub fn register_domain(timestamp: u64, owner: &str, name: &str) -> Self {
        let timestamp = timestamp.to_string();
        Self::from_fields(&[
            ("timestamp", timestamp.as_str()),
            ("owner", owner),
            ("name", name),
        ])
    }

    pub fn register_asset(timestamp: u64, creator: &str, name: &str) -> Self {
        let timestamp = timestamp.to_string();
        Self::from_fields(&[
            ("timestamp", timestamp.as_str()),
            ("creator", creator),
            ("name", name),
        ])
    }

    pub fn operation(
        timestamp: u64,
        sender: &str,
        receiver: &str,
        command: &str,
        amount: u64,
        asset_uuid: &str,
    ) -> Self {
        let amount = amount.to_string();
        let timestamp = timestamp.to_string();
        Self::from_fields(&[
            ("timestamp", timestamp.as_str()),
            ("sender", sender),
            ("receiver", receiver),
            ("command", command),
            ("amount", amount.as_str()),
            ("asset-uuid", asset_uuid),
        ])
    }

    /// The server expects the message body glued to its field name.
    pub fn send_message(timestamp: u64, message: &str, creator: &str) -> Self {
        Self::from_fields(&[("timestamp", timestamp.to_string().as_str())])
            .bare_field("message", message)
            .field("creator", creator)
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl fmt::Display for CanonicalMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_domain_layout() {
        let msg = CanonicalMessage::register_domain(1_500_000_000, "PUB", "soramitsu");
        assert_eq!(msg.as_str(), "timestamp:1500000000,owner:PUB,name:soramitsu");
    }

    #[test]
    fn register_asset_layout() {
        let msg = CanonicalMessage::register_asset(42, "PUB", "coin");
        assert_eq!(msg.as_str(), "timestamp:42,creator:PUB,name:coin");
    }

    #[test]
    fn operation_layout() {
        let msg = CanonicalMessage::operation(42, "ME", "YOU", "transfer", 100, "uuid-1");
        assert_eq!(
            msg.as_str(),
            "timestamp:42,sender:ME,receiver:YOU,command:transfer,amount:100,asset-uuid:uuid-1"
        );
    }

    #[test]
    fn send_message_layout() {
        let msg = CanonicalMessage::send_message(42, "hello", "PUB");
        assert_eq!(msg.as_str(), "timestamp:42,messagehello,creator:PUB");
    }

    #[test]
    fn identical_inputs_render_identically() {
        let a = CanonicalMessage::operation(7, "s", "r", "transfer", 3, "u");
        let b = CanonicalMessage::operation(7, "s", "r", "transfer", 3, "u");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.as_str());
    }

    #[test]
    fn builder_matches_field_list() {
        let built = CanonicalMessage::from_fields(&[]).field("a", "1").field("b", "2");
        assert_eq!(built, CanonicalMessage::from_fields(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn empty_field_list_renders_empty() {
        assert_eq!(CanonicalMessage::from_fields(&[]).as_str(), "");
    }
}

/// Receiver board address used when no override is compiled in.
pub const DEFAULT_PEER_MAC: [u8; 6] = [0x44, 0x1D, 0x64, 0xF6, 0xD9, 0xF0];

/// Parses `aa:bb:cc:dd:ee:ff` (either case, `:` or `-` separators).
///
/// `const` so a build-time override can be checked at compile time.
pub const fn parse_peer_mac(text: &str) -> Option<[u8; 6]> {
    let bytes = text.as_bytes();
    if bytes.len() != 17 {
        return None;
    }

    let mut mac = [0u8; 6];
    let mut octet = 0;
    while octet < 6 {
        let at = octet * 3;
        let (Some(hi), Some(lo)) = (hex_nibble(bytes[at]), hex_nibble(bytes[at + 1])) else {
            return None;
        };
        if octet < 5 && bytes[at + 2] != b':' && bytes[at + 2] != b'-' {
            return None;
        }
        mac[octet] = (hi << 4) | lo;
        octet += 1;
    }
    Some(mac)
}

const fn hex_nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_receiver_address() {
        assert_eq!(parse_peer_mac("44:1D:64:F6:D9:F0"), Some(DEFAULT_PEER_MAC));
        assert_eq!(parse_peer_mac("44-1d-64-f6-d9-f0"), Some(DEFAULT_PEER_MAC));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert_eq!(parse_peer_mac(""), None);
        assert_eq!(parse_peer_mac("44:1D:64:F6:D9"), None);
        assert_eq!(parse_peer_mac("44:1D:64:F6:D9:FG"), None);
        assert_eq!(parse_peer_mac("44.1D.64.F6.D9.F0"), None);
        assert_eq!(parse_peer_mac("44:1D:64:F6:D9:F0:"), None);
    }
}

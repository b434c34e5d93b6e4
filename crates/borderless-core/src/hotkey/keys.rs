/// Converts a key name string to a Windows virtual key code.
///
/// Supports letters, digits, function keys F1 to F24, the lock keys
/// and common named keys. Matching is case-insensitive.
pub fn vk_from_name(name: &str) -> Option<u32> {
    let upper = name.to_ascii_uppercase();

    // Letters and digits share their ASCII code.
    if let [ch] = upper.as_bytes()
        && ch.is_ascii_alphanumeric()
    {
        return Some(u32::from(*ch));
    }

    // VK_F1 = 0x70 through VK_F24 = 0x87
    if let Some(rest) = upper.strip_prefix('F')
        && let Ok(n) = rest.parse::<u32>()
        && (1..=24).contains(&n)
    {
        return Some(0x70 + n - 1);
    }

    if let Some(rest) = upper.strip_prefix("NUMPAD")
        && let Ok(n) = rest.parse::<u32>()
        && n <= 9
    {
        return Some(0x60 + n);
    }

    match upper.as_str() {
        // Lock and system keys
        "SCROLLLOCK" | "SCROLL" => Some(0x91),
        "PAUSE" | "BREAK" => Some(0x13),
        "PRINTSCREEN" | "PRTSC" => Some(0x2C),
        "CAPSLOCK" => Some(0x14),
        "NUMLOCK" => Some(0x90),

        // Navigation
        "ENTER" | "RETURN" => Some(0x0D),
        "TAB" => Some(0x09),
        "ESCAPE" | "ESC" => Some(0x1B),
        "SPACE" => Some(0x20),
        "BACKSPACE" => Some(0x08),
        "DELETE" | "DEL" => Some(0x2E),
        "INSERT" | "INS" => Some(0x2D),
        "HOME" => Some(0x24),
        "END" => Some(0x23),
        "PAGEUP" | "PGUP" => Some(0x21),
        "PAGEDOWN" | "PGDN" => Some(0x22),

        "LEFT" => Some(0x25),
        "UP" => Some(0x26),
        "RIGHT" => Some(0x27),
        "DOWN" => Some(0x28),

        // Numpad operators
        "MULTIPLY" => Some(0x6A),
        "ADD" => Some(0x6B),
        "SUBTRACT" => Some(0x6D),
        "DIVIDE" => Some(0x6F),

        _ => None,
    }
}

use rand::rngs::OsRng;
use rand::Rng;

/// 32 symbols, excluding the visually ambiguous I, O, 0 and 1.
pub const REFERENCE_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Booking references are 6 symbols, giving a 32^6 space.
pub const REFERENCE_LEN: usize = 6;

/// Bound on redraws when a candidate collides with an existing booking.
/// Exists to prevent an unbounded loop, not because it is expected to be hit.
pub const MAX_REFERENCE_ATTEMPTS: u32 = 100;

/// Draws one candidate booking reference from the unambiguous alphabet.
/// Uniqueness against existing bookings is checked by the caller inside the
/// booking transaction.
pub fn draw_reference() -> String {
    let mut rng = OsRng;
    (0..REFERENCE_LEN)
        .map(|_| REFERENCE_ALPHABET[rng.gen_range(0..REFERENCE_ALPHABET.len())] as char)
        .collect()
}

/// True when the string is a well-formed booking reference.
pub fn is_valid_reference(reference: &str) -> bool {
    reference.len() == REFERENCE_LEN
        && reference.bytes().all(|b| REFERENCE_ALPHABET.contains(&b))
}

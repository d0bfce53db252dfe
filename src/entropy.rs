use rand::RngCore;
use zeroize::Zeroizing;

use crate::OsRng;

/**
    Fills `size` bytes from the operating system's secure random source.

    The buffer is zeroed when dropped. Fails only when the OS source is
    unavailable; the caller decides whether that is worth retrying.
*/
pub fn random_bytes(size: usize) -> Result<Zeroizing<Vec<u8>>, rand::Error> {
    let mut bytes = Zeroizing::new(vec![0u8; size]);
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(bytes)
}

//! Capacity guard — the only code that writes `enrolled_count`.
//!
//! Reservation is a single compare-and-increment statement, never a
//! read-then-write pair, so two concurrent bookings against the last free
//! slot cannot both observe room and both succeed. Callers run these
//! inside the booking/cancellation transaction.

use rusqlite::Connection;

/// Atomically claim one slot. Returns `false` when the term is full or no
/// longer scheduled.
pub(crate) fn try_reserve(
  conn: &Connection,
  term_id: &str,
) -> rusqlite::Result<bool> {
  let changed = conn.execute(
    "UPDATE terms
     SET enrolled_count = enrolled_count + 1
     WHERE term_id = ?1
       AND status = 'scheduled'
       AND enrolled_count < capacity",
    rusqlite::params![term_id],
  )?;
  Ok(changed == 1)
}

/// Give one slot back, floored at zero.
pub(crate) fn release(
  conn: &Connection,
  term_id: &str,
) -> rusqlite::Result<()> {
  conn.execute(
    "UPDATE terms
     SET enrolled_count = MAX(enrolled_count - 1, 0)
     WHERE term_id = ?1",
    rusqlite::params![term_id],
  )?;
  Ok(())
}

/// Zero the counter; used when a term-wide cancellation cascades every
/// confirmed enrollment out in the same transaction.
pub(crate) fn clear(
  conn: &Connection,
  term_id: &str,
) -> rusqlite::Result<()> {
  conn.execute(
    "UPDATE terms SET enrolled_count = 0 WHERE term_id = ?1",
    rusqlite::params![term_id],
  )?;
  Ok(())
}

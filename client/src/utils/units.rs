pub const fn kilobyte(units: u64) -> u64 {
    units * 1024
}

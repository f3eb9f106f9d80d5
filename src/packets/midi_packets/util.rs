pub(crate) trait StatusBit {
    fn status_bit(&self) -> bool;
    fn seven_bits(&self) -> u8;
}

impl StatusBit for u8 {
    fn status_bit(&self) -> bool {
        self & 0x80 != 0
    }

    fn seven_bits(&self) -> u8 {
        self & 0x7F
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_bit_and_payload() {
        assert!(0x80u8.status_bit());
        assert!(!0x7Fu8.status_bit());
        assert_eq!(0xC5u8.seven_bits(), 0x45);
        assert_eq!(0x45u8.seven_bits(), 0x45);
    }
}

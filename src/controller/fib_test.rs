#[cfg(test)]
mod tests {
    use crate::controller::fib::{fib, MAX_FIB_INDEX};

    /// Test the first terms of the sequence.
    #[test]
    fn test_fib_small_indices() {
        let expected = [0u64, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55];
        for (n, want) in expected.iter().enumerate() {
            assert_eq!(fib(n as u32), Some(*want), "fib({})", n);
        }
    }

    /// Test the u64 overflow boundary.
    #[test]
    fn test_fib_overflow_boundary() {
        assert_eq!(fib(MAX_FIB_INDEX), Some(12_200_160_415_121_876_738));
        assert_eq!(fib(MAX_FIB_INDEX + 1), None);
    }
}

//! Remove-and-reinsert primitive for the host's ordered collection.

use thiserror::Error;

/// Errors from [`MutableListExt::move_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("index {index} out of range for list of length {len}")]
    OutOfRange { index: usize, len: usize },
}

/// Reordering for ordered collections.
pub trait MutableListExt {
    /// Removes the element at `from` and reinserts it at `to`.
    ///
    /// No-op when `from == to`, checked before bounds. Otherwise fails if
    /// either index is outside the list.
    fn move_item(&mut self, from: usize, to: usize) -> Result<(), MoveError>;
}

impl<T> MutableListExt for Vec<T> {
    fn move_item(&mut self, from: usize, to: usize) -> Result<(), MoveError> {
        if from == to {
            return Ok(());
        }
        let len = self.len();
        for index in [from, to] {
            if index >= len {
                return Err(MoveError::OutOfRange { index, len });
            }
        }
        let element = self.remove(from);
        self.insert(to, element);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_move_forward_and_back() {
        let mut list = vec![1, 2, 3, 4, 5];
        list.move_item(0, 3).unwrap();
        assert_eq!(list, vec![2, 3, 4, 1, 5]);
        list.move_item(4, 0).unwrap();
        assert_eq!(list, vec![5, 2, 3, 4, 1]);
    }

    #[test]
    fn test_same_index_is_noop() {
        let mut list = vec!['a', 'b'];
        list.move_item(1, 1).unwrap();
        assert_eq!(list, vec!['a', 'b']);
    }

    #[test]
    fn test_out_of_range() {
        let mut list = vec![1, 2, 3];
        assert_eq!(
            list.move_item(3, 0),
            Err(MoveError::OutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            list.move_item(0, 7),
            Err(MoveError::OutOfRange { index: 7, len: 3 })
        );
        assert_eq!(list, vec![1, 2, 3]);

        let mut empty: Vec<u8> = Vec::new();
        assert_eq!(empty.move_item(0, 0), Ok(()));
        assert!(empty.move_item(0, 1).is_err());
    }

    #[test]
    fn test_error_message() {
        let err = MoveError::OutOfRange { index: 9, len: 2 };
        assert_eq!(err.to_string(), "index 9 out of range for list of length 2");
    }

    proptest! {
        #[test]
        fn move_then_inverse_restores_order(
            len in 1usize..32,
            from_seed in 0usize..1000,
            to_seed in 0usize..1000,
        ) {
            let from = from_seed % len;
            let to = to_seed % len;
            let original: Vec<usize> = (0..len).collect();
            let mut list = original.clone();
            list.move_item(from, to).unwrap();
            list.move_item(to, from).unwrap();
            prop_assert_eq!(list, original);
        }
    }
}

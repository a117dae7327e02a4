use std::collections::BTreeSet;

/// Move the element at `old_index` to `new_index`, shifting the elements in
/// between. Returns `None` when either index is out of bounds, which happens
/// when a drag gesture reports indices from a stale render.
pub fn array_move<T: Clone>(items: &[T], old_index: usize, new_index: usize) -> Option<Vec<T>> {
    if old_index >= items.len() || new_index >= items.len() {
        return None;
    }
    let mut moved = items.to_vec();
    let item = moved.remove(old_index);
    moved.insert(new_index, item);
    Some(moved)
}

/// Drag-and-drop form of [`array_move`]: `from` is dropped onto `to`.
pub fn move_by_id(columns: &[String], from: &str, to: &str) -> Option<Vec<String>> {
    let old_index = columns.iter().position(|c| c == from)?;
    let new_index = columns.iter().position(|c| c == to)?;
    array_move(columns, old_index, new_index)
}

/// Order used by the column-order reset: plain lexicographic by field name.
pub fn alphabetical_order(fields: &[String]) -> Vec<String> {
    let mut sorted = fields.to_vec();
    sorted.sort();
    sorted.dedup();
    sorted
}

/// The columns a table actually renders: the reconciled order minus hidden fields.
pub fn effective_columns(order: &[String], hidden: &BTreeSet<String>) -> Vec<String> {
    order
        .iter()
        .filter(|field| !hidden.contains(field.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_array_move_relocates_instead_of_swapping() {
        let columns = names(&["a", "b", "c", "d"]);
        assert_eq!(array_move(&columns, 0, 2), Some(names(&["b", "c", "a", "d"])));
        assert_eq!(array_move(&columns, 3, 0), Some(names(&["d", "a", "b", "c"])));
        assert_eq!(array_move(&columns, 1, 1), Some(columns.clone()));
    }

    #[test]
    fn test_array_move_out_of_bounds() {
        let columns = names(&["a", "b", "c", "d"]);
        assert_eq!(array_move(&columns, 5, 1), None);
        assert_eq!(array_move(&columns, 1, 4), None);
        assert_eq!(array_move::<String>(&[], 0, 0), None);
    }

    #[test]
    fn test_move_by_id() {
        let columns = names(&["id", "name", "created_at"]);
        assert_eq!(
            move_by_id(&columns, "created_at", "id"),
            Some(names(&["created_at", "id", "name"]))
        );
        assert_eq!(move_by_id(&columns, "missing", "id"), None);
    }

    #[test]
    fn test_alphabetical_order() {
        let fields = names(&["name", "id", "created_at"]);
        assert_eq!(alphabetical_order(&fields), names(&["created_at", "id", "name"]));
    }

    #[test]
    fn test_effective_columns_keeps_relative_order() {
        let order = names(&["id", "title", "description", "price"]);
        let hidden: BTreeSet<String> = ["description".to_string()].into();
        assert_eq!(
            effective_columns(&order, &hidden),
            names(&["id", "title", "price"])
        );
    }
}

use itemview_types::SortOrder;

/// Next sort state after a click on the header of `clicked`.
///
/// Repeated clicks on one column cycle ascending -> descending -> unsorted;
/// clicking any other column starts over at ascending.
pub fn next_sort_order(current: &SortOrder, clicked: &str) -> SortOrder {
    match current {
        SortOrder::Ascending(field) if field == clicked => SortOrder::Descending(field.clone()),
        SortOrder::Descending(field) if field == clicked => SortOrder::Unsorted,
        _ => SortOrder::Ascending(clicked.to_string()),
    }
}

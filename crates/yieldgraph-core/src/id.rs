use slotmap::new_key_type;

new_key_type! {
    /// Identifies an item in a production graph. Cheap to copy and compare.
    pub struct ItemId;

    /// Identifies a recipe in a production graph.
    pub struct RecipeId;
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn ids_are_stable_per_arena() {
        let mut items: SlotMap<ItemId, &str> = SlotMap::with_key();
        let a = items.insert("iron-ore");
        let b = items.insert("iron-plate");
        assert_ne!(a, b);
        assert_eq!(items[a], "iron-ore");
    }

    #[test]
    fn ids_are_hashable() {
        use std::collections::HashMap;
        let mut recipes: SlotMap<RecipeId, ()> = SlotMap::with_key();
        let smelt = recipes.insert(());
        let mut map = HashMap::new();
        map.insert(smelt, "smelt");
        assert_eq!(map[&smelt], "smelt");
    }
}

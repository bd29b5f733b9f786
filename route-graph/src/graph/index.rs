use std::ops::Index;

use super::{City, Node};

/// Maps cities to dense node ids. Cities are kept sorted, so ids follow label order.
#[derive(Debug, Clone, Default)]
pub struct CityIndex {
    cities: Vec<City>,
}

impl CityIndex {
    pub fn init(cities: impl IntoIterator<Item = City>) -> Self {
        let mut cities: Vec<City> = cities.into_iter().collect();
        cities.sort();
        cities.dedup();
        Self { cities }
    }

    pub fn empty() -> Self {
        Self { cities: vec![] }
    }

    pub fn get(&self, city: &City) -> Option<Node> {
        self.cities.binary_search(city).ok().map(Node::new)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }
}

impl Index<Node> for CityIndex {
    type Output = City;

    fn index(&self, node: Node) -> &Self::Output {
        &self.cities[node.id()]
    }
}

#[cfg(test)]
mod test_city_index {
    use super::*;

    #[test]
    fn test_sorted_and_deduplicated() {
        let index = CityIndex::init(
            vec!["Phoenix", "Austin", "Phoenix", "Dallas"]
                .into_iter()
                .map(City::from),
        );
        assert_eq!(index.len(), 3);
        assert_eq!(index.get(&"Austin".into()), Some(Node::new(0)));
        assert_eq!(index.get(&"Dallas".into()), Some(Node::new(1)));
        assert_eq!(index.get(&"Phoenix".into()), Some(Node::new(2)));
        assert_eq!(index.get(&"Houston".into()), None);
        assert_eq!(index[Node::new(1)], City::from("Dallas"));
    }
}

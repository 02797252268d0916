use fxhash::{FxHashMap, FxHashSet};

pub type Map<K, V> = FxHashMap<K, V>;
pub type Set<V> = FxHashSet<V>;

pub const fn implies(premise: bool, conclusion: bool) -> bool {
    !premise || conclusion
}

pub trait BitSet: Clone + PartialEq + Eq + PartialOrd + Ord {
    type Iter<'a>: Iterator<Item = u32>
    where
        Self: 'a;

    fn full_with_size(bits: usize) -> Self;
    fn get(&self, index: u32) -> bool;
    fn set_bit(&mut self, index: u32);
    fn clear_bit(&mut self, index: u32);
    fn set(&mut self, index: u32, value: bool) {
        if value {
            self.set_bit(index);
        } else {
            self.clear_bit(index);
        }
    }

    fn contains(&self, index: u32) -> bool {
        self.get(index)
    }
    fn iter<'a>(&'a self) -> Self::Iter<'a>;
    fn len(&self) -> u32 {
        self.iter().count() as u32
    }
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub type BitSet64 = u64;

pub struct BitSet64Iter<'a> {
    set: &'a BitSet64,
    current_index: u32,
}

impl Iterator for BitSet64Iter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current_index < 64 {
            if self.set & (1 << self.current_index) != 0 {
                let current_index = self.current_index;
                self.current_index += 1;
                return Some(current_index);
            } else {
                self.current_index += 1;
            }
        }
        None
    }
}

impl BitSet for BitSet64 {
    type Iter<'a> = BitSet64Iter<'a>;

    fn full_with_size(bits: usize) -> Self {
        if bits == 64 {
            Self::MAX
        } else {
            (1 << bits) - 1
        }
    }

    fn get(&self, index: u32) -> bool {
        debug_assert!(index < 64);
        self & (1 << index) != 0
    }

    fn set_bit(&mut self, index: u32) {
        debug_assert!(index < 64);
        *self |= 1 << index;
    }

    fn clear_bit(&mut self, index: u32) {
        debug_assert!(index < 64);
        *self &= !(1 << index);
    }

    fn iter<'a>(&'a self) -> Self::Iter<'a> {
        Self::Iter {
            set: self,
            current_index: 0,
        }
    }

    fn len(&self) -> u32 {
        self.count_ones()
    }
}

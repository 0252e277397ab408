use pulseox_types::Sample;

/// Fixed-capacity ring buffer keeping the `N` most recent values.
///
/// Storage is an inline array; `push` on a full buffer overwrites the oldest
/// entry. Iteration always yields values oldest first.
#[derive(Debug, Clone)]
pub struct History<T, const N: usize> {
    slots: [T; N],
    head: usize,
    len: usize,
}

impl<T: Copy + Default, const N: usize> Default for History<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default, const N: usize> History<T, N> {
    pub fn new() -> Self {
        Self {
            slots: [T::default(); N],
            head: 0,
            len: 0,
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Appends `value`, returning the evicted oldest value when full.
    pub fn push(&mut self, value: T) -> Option<T> {
        if N == 0 {
            return Some(value);
        }

        if self.len == N {
            let evicted = std::mem::replace(&mut self.slots[self.head], value);
            self.head = (self.head + 1) % N;
            Some(evicted)
        } else {
            self.slots[(self.head + self.len) % N] = value;
            self.len += 1;
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<T> {
        (index < self.len).then(|| self.slots[(self.head + index) % N])
    }

    pub fn first(&self) -> Option<T> {
        self.get(0)
    }

    pub fn last(&self) -> Option<T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = T> + '_ {
        (0..self.len).map(move |i| self.slots[(self.head + i) % N])
    }
}

/// Red and infrared histories that only ever grow together.
#[derive(Debug, Clone, Default)]
pub struct SampleWindow<const N: usize> {
    red: History<u32, N>,
    infrared: History<u32, N>,
}

impl<const N: usize> SampleWindow<N> {
    pub fn new() -> Self {
        Self {
            red: History::new(),
            infrared: History::new(),
        }
    }

    pub fn push(&mut self, sample: Sample) {
        self.red.push(sample.red);
        self.infrared.push(sample.infrared);
    }

    pub fn red(&self) -> &History<u32, N> {
        &self.red
    }

    pub fn infrared(&self) -> &History<u32, N> {
        &self.infrared
    }

    pub fn len(&self) -> usize {
        self.red.len()
    }

    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }

    pub fn clear(&mut self) {
        self.red.clear();
        self.infrared.clear();
    }
}

/// produces the buckets [ (at(i), at(i + 1)) | i <- 0..buckets ]
/// where at(i) = linear_interpol(lo, hi, i / buckets)
///
/// the edges are interpolated, not accumulated, so the last bucket ends exactly at hi
#[derive(Clone, Debug)]
pub struct BinEdges {
    current: u64,
    buckets: u64,
    lo: f64,
    hi: f64,
}

impl BinEdges {
    pub fn new(lo: f64, hi: f64, buckets: u64) -> Self {
        BinEdges {
            current: 0,
            buckets,
            lo,
            hi,
        }
    }

    /// bucket width, identical for all buckets up to rounding
    pub fn width(&self) -> f64 {
        (self.hi - self.lo) / self.buckets as f64
    }

    /// index of the bucket holding v; values equal to hi go to the last bucket
    pub fn index_of(&self, v: f64) -> Option<usize> {
        if self.buckets == 0 || v < self.lo || v > self.hi || v.is_nan() {
            return None;
        }
        let i = ((v - self.lo) / self.width()).floor() as u64;
        Some(i.min(self.buckets - 1) as usize)
    }

    fn at(&self, pos: u64) -> f64 {
        if pos == self.buckets {
            return self.hi;
        }
        let f_pos = pos as f64 / self.buckets as f64;
        (1. - f_pos) * self.lo + f_pos * self.hi
    }

    fn usize_len(&self) -> usize {
        self.buckets.saturating_sub(self.current) as usize
    }
}

impl Iterator for BinEdges {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.buckets {
            return None;
        }
        let result = (self.at(self.current), self.at(self.current + 1));
        self.current += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let l = self.usize_len();
        (l, Some(l))
    }
}

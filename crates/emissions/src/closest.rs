/// Absolute difference that can't overflow.
pub trait Distance: Copy {
    type Output: PartialOrd;

    fn distance(self, other: Self) -> Self::Output;
}


macro_rules! int_distance {
    ($($t:ty => $out:ty),*) => {
        $(
            impl Distance for $t {
                type Output = $out;

                fn distance(self, other: Self) -> $out {
                    self.abs_diff(other)
                }
            }
        )*
    };
}


int_distance!(
    i32 => u32, i64 => u64, isize => usize,
    u32 => u32, u64 => u64, usize => usize
);


impl Distance for f64 {
    type Output = f64;

    fn distance(self, other: Self) -> f64 {
        (self - other).abs()
    }
}


/// Returns the element of `values` nearest to `goal`.
///
/// Ties go to the earliest element. Returns `None` for an empty slice.
pub fn find_closest<T: Distance>(goal: T, values: &[T]) -> Option<T> {
    let (&first, rest) = values.split_first()?;
    let mut closest = first;
    let mut diff = first.distance(goal);
    for &x in rest {
        let d = x.distance(goal);
        if d < diff {
            diff = d;
            closest = x;
        }
    }
    Some(closest)
}

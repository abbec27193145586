//! 下标排列生成
//!
//! 按"插入顺序"枚举 `0..n` 的全部排列：先得到 `1..n` 的全部排列，再把 `0` 依次插入
//! 每个排列的每个位置，递归定义。第一个排列是恒等排列。`n = 3` 时的顺序为
//! `[0,1,2] [1,0,2] [1,2,0] [0,2,1] [2,0,1] [2,1,0]`。

/// 插入顺序排列迭代器，共产生 `n!` 个排列（`n == 0` 时产生一个空排列）
///
/// `positions[k]` 是元素 `k` 插入到 `k+1..n` 已排好序列中的位置，取值 `0..=n-1-k`；
/// 整体按混合进制计数，`positions[0]` 变化最快。
#[derive(Debug, Clone)]
pub struct Permutations {
    positions: Vec<usize>,
    done: bool,
}

impl Permutations {
    pub fn new(n: usize) -> Self {
        Self {
            positions: vec![0; n],
            done: false,
        }
    }

    fn build(&self) -> Vec<usize> {
        let n = self.positions.len();
        let mut items = Vec::with_capacity(n);
        for k in (0..n).rev() {
            items.insert(self.positions[k], k);
        }
        items
    }

    /// 计数器加一，全部进位后返回 `false`
    fn advance(&mut self) -> bool {
        let n = self.positions.len();
        for k in 0..n {
            if self.positions[k] < n - 1 - k {
                self.positions[k] += 1;
                return true;
            }
            self.positions[k] = 0;
        }
        false
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let item = self.build();
        self.done = !self.advance();
        Some(item)
    }
}

/// `n!`，溢出时返回 `None`
pub fn factorial(n: usize) -> Option<usize> {
    (1..=n).try_fold(1usize, |acc, k| acc.checked_mul(k))
}

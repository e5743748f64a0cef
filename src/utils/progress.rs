use tracing::debug;

/// 分箱计算的逐行进度回调
/// row 从 1 开始计数
pub trait RowProgress {
    fn row_done(&mut self, row: usize, total_rows: usize);
}

/// 不报告进度
pub struct NoProgress;

impl RowProgress for NoProgress {
    fn row_done(&mut self, _row: usize, _total_rows: usize) {}
}

/// 通过 tracing 在 debug 级别输出每一行的完成情况
pub struct TracingProgress<'a> {
    label: &'a str,
}

impl<'a> TracingProgress<'a> {
    pub fn new(label: &'a str) -> Self {
        Self { label }
    }
}

impl RowProgress for TracingProgress<'_> {
    fn row_done(&mut self, row: usize, total_rows: usize) {
        debug!(label = self.label, row, total_rows, "第 {} 行统计完成", row);
    }
}

impl<F> RowProgress for F
where
    F: FnMut(usize, usize),
{
    fn row_done(&mut self, row: usize, total_rows: usize) {
        self(row, total_rows)
    }
}

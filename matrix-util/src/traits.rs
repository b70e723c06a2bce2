use crate::common_io::Delimiter;

/// Which half of an adjacency matrix survives `symmetrize`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymmetrizeMethod {
    /// keep the upper-right triangle
    #[default]
    Triu,
    /// keep the lower-left triangle
    Tril,
    /// average the two triangles
    Avg,
}

impl std::str::FromStr for SymmetrizeMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "triu" => Ok(SymmetrizeMethod::Triu),
            "tril" => Ok(SymmetrizeMethod::Tril),
            "avg" => Ok(SymmetrizeMethod::Avg),
            _ => anyhow::bail!("unknown symmetrize method: {} (triu, tril, avg)", s),
        }
    }
}

/// Operations on a square adjacency matrix. Row `i` holds the
/// out-going edges of vertex `i`; column `j` the in-coming edges of
/// vertex `j`.
pub trait GraphOps {
    type Mat;
    type Scalar;

    /// Force symmetry: `A + A' - diag(A)` after keeping the half
    /// chosen by `method`
    fn symmetrize(&self, method: SymmetrizeMethod) -> anyhow::Result<Self::Mat>;

    /// Zero out the diagonal (self-loops)
    fn remove_loops(&self) -> anyhow::Result<Self::Mat>;

    /// Every nonzero entry becomes one
    fn binarize(&self) -> Self::Mat;

    fn is_symmetric(&self) -> bool;

    /// `true` if any diagonal entry is nonzero
    fn has_loops(&self) -> bool;

    /// `true` if every entry is either zero or one
    fn is_unweighted(&self) -> bool;

    /// Number of nonzero entries in each row
    fn out_degree_counts(&self) -> Vec<usize>;

    /// Number of nonzero entries in each column
    fn in_degree_counts(&self) -> Vec<usize>;
}

/// Read and write matrices from and to files
pub trait IoOps {
    type Scalar;
    type Mat;

    fn read_file_delim(
        file: &str,
        delim: impl Into<Delimiter>,
        skip: Option<usize>,
    ) -> anyhow::Result<Self::Mat>;

    fn from_tsv(tsv_file: &str, skip: Option<usize>) -> anyhow::Result<Self::Mat> {
        Self::read_file_delim(tsv_file, "\t", skip)
    }

    fn from_csv(csv_file: &str, skip: Option<usize>) -> anyhow::Result<Self::Mat> {
        Self::read_file_delim(csv_file, ",", skip)
    }

    fn write_file_delim(&self, file: &str, delim: &str) -> anyhow::Result<()>;

    fn to_tsv(&self, tsv_file: &str) -> anyhow::Result<()> {
        self.write_file_delim(tsv_file, "\t")
    }

    fn to_csv(&self, csv_file: &str) -> anyhow::Result<()> {
        self.write_file_delim(csv_file, ",")
    }
}

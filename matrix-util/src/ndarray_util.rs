pub use ndarray::prelude::*;

use crate::traits::*;
use num_traits::Float;

fn check_square<T>(xx: &Array2<T>) -> anyhow::Result<usize> {
    let (nrow, ncol) = xx.dim();
    if nrow != ncol {
        anyhow::bail!("adjacency matrix is not square: {} x {}", nrow, ncol);
    }
    Ok(nrow)
}

impl<T> GraphOps for Array2<T>
where
    T: Float,
{
    type Mat = Self;
    type Scalar = T;

    fn symmetrize(&self, method: SymmetrizeMethod) -> anyhow::Result<Self::Mat> {
        let n = check_square(self)?;
        let two = T::one() + T::one();

        Ok(Array2::from_shape_fn((n, n), |(i, j)| {
            let (lo, hi) = (i.min(j), i.max(j));
            match method {
                SymmetrizeMethod::Triu => self[(lo, hi)],
                SymmetrizeMethod::Tril => self[(hi, lo)],
                SymmetrizeMethod::Avg if i == j => self[(i, i)],
                SymmetrizeMethod::Avg => (self[(lo, hi)] + self[(hi, lo)]) / two,
            }
        }))
    }

    fn remove_loops(&self) -> anyhow::Result<Self::Mat> {
        check_square(self)?;
        let mut ret = self.clone();
        ret.diag_mut().fill(T::zero());
        Ok(ret)
    }

    fn binarize(&self) -> Self::Mat {
        self.mapv(|x| if x != T::zero() { T::one() } else { T::zero() })
    }

    fn is_symmetric(&self) -> bool {
        self.nrows() == self.ncols() && self.view() == self.t()
    }

    fn has_loops(&self) -> bool {
        self.diag().iter().any(|&x| x != T::zero())
    }

    fn is_unweighted(&self) -> bool {
        self.iter().all(|&x| x == T::zero() || x == T::one())
    }

    fn out_degree_counts(&self) -> Vec<usize> {
        self.rows()
            .into_iter()
            .map(|row| row.iter().filter(|&&x| x != T::zero()).count())
            .collect()
    }

    fn in_degree_counts(&self) -> Vec<usize> {
        self.columns()
            .into_iter()
            .map(|col| col.iter().filter(|&&x| x != T::zero()).count())
            .collect()
    }
}

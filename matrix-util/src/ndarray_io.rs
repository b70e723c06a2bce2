use crate::common_io::{mkdir, read_lines_of_words_delim, write_lines, Delimiter};
use crate::traits::IoOps;
use ndarray::prelude::*;
use std::fmt::{Debug, Display};
use std::str::FromStr;

impl<T> IoOps for Array2<T>
where
    T: FromStr + Send + Display,
    <T as FromStr>::Err: Debug,
{
    type Scalar = T;
    type Mat = Self;

    /// Each non-comment line is a row; every row must have the same
    /// number of fields.
    fn read_file_delim(
        file: &str,
        delim: impl Into<Delimiter>,
        skip: Option<usize>,
    ) -> anyhow::Result<Self::Mat> {
        let lines_of_words = read_lines_of_words_delim(file, delim, skip.unwrap_or(0))?;

        if lines_of_words.is_empty() {
            anyhow::bail!("no data in {}", file);
        }

        let nrows = lines_of_words.len();
        let ncols = lines_of_words[0].len();

        let mut data = Vec::with_capacity(nrows * ncols);
        for (i, words) in lines_of_words.iter().enumerate() {
            if words.len() != ncols {
                anyhow::bail!(
                    "{}: row {} has {} fields, expected {}",
                    file,
                    i,
                    words.len(),
                    ncols
                );
            }
            for w in words {
                let x = w
                    .parse::<T>()
                    .map_err(|e| anyhow::anyhow!("{}: row {}: cannot parse {:?}: {:?}", file, i, w, e))?;
                data.push(x);
            }
        }

        Ok(Array2::from_shape_vec((nrows, ncols), data)?)
    }

    fn write_file_delim(&self, file: &str, delim: &str) -> anyhow::Result<()> {
        let lines: Vec<Box<str>> = self
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .map(|x| format!("{}", x))
                    .collect::<Vec<String>>()
                    .join(delim)
                    .into_boxed_str()
            })
            .collect();
        mkdir(file)?;
        write_lines(&lines, file)?;
        Ok(())
    }
}

pub mod rates_csv;

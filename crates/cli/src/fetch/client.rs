use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;

use covis_data::resource;

use crate::fetch::error::FetchError;
use crate::fetch::error::Result;

const RECORDS_URL: &str = "https://covidtracking.com/api/states/daily";
const GEOMETRY_URL: &str =
    "https://raw.githubusercontent.com/PublicaMundi/MappingAPI/master/data/geojson/us-states.json";
const FIPS_URL: &str = "https://gist.githubusercontent.com/mbejda/4c62c7d64af5556b355a67d09cd3bf34/raw/d4ceb79eba71931e9d9fe43eb91eedd78f4fcc61/states_by_fips.json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) struct DataClient {
    client: Client,
}

impl DataClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self { client })
    }

    /// Downloads the daily testing records into `path/daily.json`.
    pub fn fetch_records(&self, path: &Path) -> Result<u64> {
        self.download(RECORDS_URL, &path.join(resource::RECORDS_FILE_NAME))
    }

    /// Downloads the state boundary dataset into `path/us-states.json`.
    pub fn fetch_geometry(&self, path: &Path) -> Result<u64> {
        self.download(GEOMETRY_URL, &path.join(resource::GEOMETRY_FILE_NAME))
    }

    /// Downloads the FIPS lookup table into `path/states-by-fips.json`.
    pub fn fetch_fips_table(&self, path: &Path) -> Result<u64> {
        self.download(FIPS_URL, &path.join(resource::FIPS_FILE_NAME))
    }

    fn download(&self, url: &str, path: &Path) -> Result<u64> {
        let mut response = self.client.get(url).send()?;

        match response.status() {
            StatusCode::OK => {
                let mut writer = OpenOptions::new()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(path)?;

                let bytes = io::copy(&mut response, &mut writer)?;
                Ok(bytes)
            }
            status_code => {
                let message = response.text()?;
                let error = FetchError::Response {
                    status_code,
                    message,
                };
                Err(error)
            }
        }
    }
}

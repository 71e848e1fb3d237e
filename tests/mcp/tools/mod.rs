mod listing;
mod scan;
mod translations;

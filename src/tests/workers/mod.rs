mod archive;
mod notify;
mod restore;
mod thaw;
